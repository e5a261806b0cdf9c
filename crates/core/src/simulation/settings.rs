//! Session settings and the live simulation configuration

use crate::error::SimulationError;
use crate::palette::PreviewStrip;
use crate::solver::{CoolingParams, SparkleParams, DEFAULT_FLAME_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Upper bound for the hotspot count
pub const MAX_HOTSPOTS: usize = 300;
/// Upper bound for the fire power (cooling scroll speed)
pub const MAX_FIRE_POWER: usize = 5;

/// Parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Grid width in cells
    pub width: usize,
    /// Visible grid height in cells
    pub height: usize,
    /// Divisor applied to cell coordinates when sampling cooling noise
    pub noise_scale: f32,
    /// Multiplier applied to cooling noise samples
    pub noise_amplitude: f32,
    /// Intensities strictly above this count as flame
    pub flame_threshold: u8,
    /// Chance per frame of an ambient spark
    pub sparkle_probability: f64,
    /// Ring radius of an ambient spark
    pub sparkle_radius: i32,
    /// Largest ring radius stamped under the pointer
    pub ignition_radius: i32,
    /// Pointer ignition only happens this many pixels inside every edge
    pub ignition_margin: i32,
    /// How long the palette preview stays up after a change, in seconds
    pub palette_preview_secs: f32,
    /// Left edge of the preview strip
    pub preview_x: usize,
    /// Top edge of the preview strip
    pub preview_y: usize,
    /// Preview strip height in rows
    pub preview_height: usize,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            noise_scale: 10.0,
            noise_amplitude: 10.0,
            flame_threshold: DEFAULT_FLAME_THRESHOLD,
            sparkle_probability: 0.2,
            sparkle_radius: 2,
            ignition_radius: 10,
            ignition_margin: 10,
            palette_preview_secs: 2.0,
            preview_x: 20,
            preview_y: 100,
            preview_height: 5,
        }
    }
}

impl EffectSettings {
    /// Default settings with a different grid size
    #[must_use]
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every setting a session depends on.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidDimensions`] for grids narrower than
    /// 4 columns or shorter than 2 rows, and [`SimulationError::InvalidSetting`]
    /// for out-of-range tuning values.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.width < 4 || self.height < 2 {
            return Err(SimulationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(SimulationError::invalid_setting(
                "noise_scale",
                format!("must be finite and positive, got {}", self.noise_scale),
            ));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(SimulationError::invalid_setting(
                "noise_amplitude",
                format!("must be finite and non-negative, got {}", self.noise_amplitude),
            ));
        }
        if !(0.0..=1.0).contains(&self.sparkle_probability) {
            return Err(SimulationError::invalid_setting(
                "sparkle_probability",
                format!("must lie in [0, 1], got {}", self.sparkle_probability),
            ));
        }
        if self.sparkle_radius < 1 {
            return Err(SimulationError::invalid_setting(
                "sparkle_radius",
                format!("must be at least 1, got {}", self.sparkle_radius),
            ));
        }
        if self.ignition_margin < 0 {
            return Err(SimulationError::invalid_setting(
                "ignition_margin",
                format!("must be non-negative, got {}", self.ignition_margin),
            ));
        }
        if !self.palette_preview_secs.is_finite() || self.palette_preview_secs <= 0.0 {
            return Err(SimulationError::invalid_setting(
                "palette_preview_secs",
                format!("must be finite and positive, got {}", self.palette_preview_secs),
            ));
        }
        Ok(())
    }

    pub(crate) fn cooling_params(&self) -> CoolingParams {
        CoolingParams {
            scale: self.noise_scale,
            amplitude: self.noise_amplitude,
        }
    }

    pub(crate) fn sparkle_params(&self) -> SparkleParams {
        SparkleParams {
            probability: self.sparkle_probability,
            radius: self.sparkle_radius,
        }
    }

    pub(crate) fn preview_strip(&self) -> PreviewStrip {
        PreviewStrip {
            x: self.preview_x,
            y: self.preview_y,
            height: self.preview_height,
        }
    }
}

/// Live tuning values, changed by input intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Hotspots per frame, in [0, 300]
    pub num_hotspots: usize,
    /// Cooling rows scrolled per frame, in [0, 5]
    pub fire_power: usize,
    /// Reuse the previous hotspot set instead of redrawing it
    pub hotspots_pinned: bool,
    /// Physics frozen
    pub paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_hotspots: 152,
            fire_power: 2,
            hotspots_pinned: false,
            paused: false,
        }
    }
}

/// Add a signed delta to `value`, clamped into `[0, max]`.
fn clamped_add(value: usize, delta: i32, max: usize) -> usize {
    let magnitude = delta.unsigned_abs() as usize;
    let moved = if delta < 0 {
        value.saturating_sub(magnitude)
    } else {
        value.saturating_add(magnitude)
    };
    moved.min(max)
}

impl SimulationConfig {
    /// Bring out-of-range values back into their documented ranges.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            num_hotspots: self.num_hotspots.min(MAX_HOTSPOTS),
            fire_power: self.fire_power.min(MAX_FIRE_POWER),
            ..self
        }
    }

    /// Adjust the hotspot count; returns true if it changed.
    pub fn adjust_hotspots(&mut self, delta: i32) -> bool {
        let before = self.num_hotspots;
        self.num_hotspots = clamped_add(before, delta, MAX_HOTSPOTS);
        self.num_hotspots != before
    }

    /// Adjust the fire power; returns true if it changed.
    pub fn adjust_fire_power(&mut self, delta: i32) -> bool {
        let before = self.fire_power;
        self.fire_power = clamped_add(before, delta, MAX_FIRE_POWER);
        self.fire_power != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(EffectSettings::default().validate().is_ok());
        assert!(EffectSettings::with_size(4, 2).validate().is_ok());
    }

    #[test]
    fn test_tiny_grid_rejected() {
        assert_eq!(
            EffectSettings::with_size(3, 240).validate(),
            Err(SimulationError::InvalidDimensions {
                width: 3,
                height: 240
            })
        );
        assert!(EffectSettings::with_size(320, 1).validate().is_err());
    }

    #[test]
    fn test_bad_tuning_rejected() {
        let cases = [
            EffectSettings {
                noise_scale: 0.0,
                ..EffectSettings::default()
            },
            EffectSettings {
                noise_scale: f32::NAN,
                ..EffectSettings::default()
            },
            EffectSettings {
                noise_amplitude: -1.0,
                ..EffectSettings::default()
            },
            EffectSettings {
                sparkle_probability: 1.5,
                ..EffectSettings::default()
            },
            EffectSettings {
                sparkle_radius: 0,
                ..EffectSettings::default()
            },
            EffectSettings {
                palette_preview_secs: 0.0,
                ..EffectSettings::default()
            },
        ];
        for settings in cases {
            assert!(
                matches!(settings.validate(), Err(SimulationError::InvalidSetting { .. })),
                "{settings:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_deltas_clamp_instead_of_rejecting() {
        let mut config = SimulationConfig::default();
        assert!(config.adjust_hotspots(1_000));
        assert_eq!(config.num_hotspots, MAX_HOTSPOTS);
        assert!(!config.adjust_hotspots(1));
        assert!(config.adjust_hotspots(i32::MIN));
        assert_eq!(config.num_hotspots, 0);

        assert!(config.adjust_fire_power(-7));
        assert_eq!(config.fire_power, 0);
        assert!(config.adjust_fire_power(9));
        assert_eq!(config.fire_power, MAX_FIRE_POWER);
    }

    #[test]
    fn test_clamped_config() {
        let config = SimulationConfig {
            num_hotspots: 999,
            fire_power: 9,
            ..SimulationConfig::default()
        }
        .clamped();
        assert_eq!(config.num_hotspots, 300);
        assert_eq!(config.fire_power, 5);
    }
}

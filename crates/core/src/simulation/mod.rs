//! Fire effect session controller
//!
//! `FireSimulation` owns every piece of session state: the double-buffered
//! intensity grid, the static cooling field, the scroll offset, the hotspot
//! set, the live configuration, the palette library and the finished frame.
//!
//! One call to [`FireSimulation::advance`] is one frame:
//!
//! 1. expire the palette preview if its deadline has passed
//! 2. apply the frame's [`InputIntent`] (configuration, pause, palette, pin, help)
//! 3. unless paused: seed hotspots, diffuse into the back buffer, measure flame
//!    height, maybe add a spark, stamp pointer ignition, swap buffers
//! 4. advance the cooling scroll offset by the fire power
//! 5. map the front buffer through the active palette
//!
//! While paused the physics is frozen and pointer ignition is ignored, but
//! configuration intents still apply and the scroll offset keeps moving.

pub mod input;
pub mod profiler;
pub mod settings;

pub use input::{InputIntent, PointerState};
pub use profiler::{FrameTimer, ProfilerScope};
pub use settings::{EffectSettings, SimulationConfig, MAX_FIRE_POWER, MAX_HOTSPOTS};

use crate::core_types::{CoolingGrid, IntensityGrid};
use crate::error::SimulationError;
use crate::palette::{draw_preview_strip, map_to_rgba, FrameBuffer, PaletteLibrary};
use crate::solver::{
    draw_disc, generate_cooling_field, inject_sparkle, step_diffusion, DiffusionParams,
    HotspotSet,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Whether the physics advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Frames evolve the heat field
    Running,
    /// The last frame is shown unchanged
    Paused,
}

/// Read-only view of the session for on-screen text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    /// Hotspots per frame
    pub num_hotspots: usize,
    /// Cooling rows scrolled per frame
    pub fire_power: usize,
    /// Active palette position
    pub palette_index: usize,
    /// Active palette name
    pub palette_name: String,
    /// Physics frozen
    pub paused: bool,
    /// Help text requested
    pub show_help: bool,
    /// Hotspot set frozen
    pub hotspots_pinned: bool,
    /// Preview strip currently drawn
    pub palette_preview_visible: bool,
    /// Flame height measured on the last running frame
    pub flame_height: usize,
    /// Frames advanced so far
    pub frame: u64,
    /// Duration of the last physics step in milliseconds
    pub last_step_ms: f64,
}

/// A running fire effect session.
pub struct FireSimulation<R: Rng = StdRng> {
    settings: EffectSettings,
    config: SimulationConfig,

    // Ping-pong buffers: diffuse from `current` into `next`, then swap
    current: IntensityGrid,
    next: IntensityGrid,

    cooling: CoolingGrid,
    scroll_offset: usize,
    hotspots: HotspotSet,
    flame_height: usize,

    palettes: PaletteLibrary,
    active_palette: usize,
    show_help: bool,

    // Session clock in seconds, and when the palette preview disappears
    clock: f64,
    preview_expires_at: Option<f64>,

    frame: FrameBuffer,
    frame_count: u64,
    frame_timer: FrameTimer,
    rng: R,
}

impl FireSimulation<StdRng> {
    /// Start a session seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation
    pub fn new(settings: EffectSettings) -> Result<Self, SimulationError> {
        Self::with_config(settings, SimulationConfig::default())
    }

    /// Start a session with an initial configuration, seeded from the
    /// operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation
    pub fn with_config(
        settings: EffectSettings,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        Self::with_rng(settings, config, StdRng::from_os_rng())
    }

    /// Start a reproducible session.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation
    pub fn seeded(
        settings: EffectSettings,
        config: SimulationConfig,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        Self::with_rng(settings, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FireSimulation<R> {
    /// Start a session drawing all randomness from `rng`.
    ///
    /// The cooling field seed, every hotspot draw and every spark come from
    /// `rng`, so a seeded generator reproduces a run exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation
    pub fn with_rng(
        settings: EffectSettings,
        config: SimulationConfig,
        mut rng: R,
    ) -> Result<Self, SimulationError> {
        settings.validate()?;
        let config = config.clamped();
        let (width, height) = (settings.width, settings.height);

        let noise_seed: u64 = rng.random();
        let cooling = generate_cooling_field(width, height, settings.cooling_params(), noise_seed);
        let hotspots = HotspotSet::generate(config.num_hotspots, width, &mut rng);
        let palettes = PaletteLibrary::builtin();

        info!(
            "Fire session initialized: {}x{} grid, noise_seed={}, {} palettes",
            width,
            height,
            noise_seed,
            palettes.count()
        );

        let preview_expires_at = Some(f64::from(settings.palette_preview_secs));
        let mut simulation = Self {
            config,
            current: IntensityGrid::new(width, height),
            next: IntensityGrid::new(width, height),
            cooling,
            scroll_offset: 0,
            hotspots,
            flame_height: 0,
            palettes,
            active_palette: 0,
            show_help: true,
            clock: 0.0,
            preview_expires_at,
            frame: FrameBuffer::new(width, height),
            frame_count: 0,
            frame_timer: FrameTimer::new(),
            rng,
            settings,
        };
        simulation.render();
        Ok(simulation)
    }

    /// Advance one frame by `dt` seconds and return the finished image.
    pub fn advance(&mut self, intent: &InputIntent, dt: f32) -> &FrameBuffer {
        self.clock += f64::from(dt.max(0.0));
        if self
            .preview_expires_at
            .is_some_and(|expires_at| self.clock >= expires_at)
        {
            self.preview_expires_at = None;
        }

        self.apply_intent(intent);

        if !self.config.paused {
            let scope = ProfilerScope::new("fire_step");
            self.step_physics(intent.pressed_pointer());
            std::mem::swap(&mut self.current, &mut self.next);
            self.frame_timer.record(scope.elapsed_ms());
        }

        self.scroll_offset = (self.scroll_offset + self.config.fire_power) % self.settings.height;
        self.render();
        self.frame_count += 1;
        &self.frame
    }

    fn apply_intent(&mut self, intent: &InputIntent) {
        if intent.pause_toggled {
            self.config.paused = !self.config.paused;
            debug!(paused = self.config.paused, "pause toggled");
        }

        if intent.hotspot_delta != 0 && self.config.adjust_hotspots(intent.hotspot_delta) {
            // Regenerate even when pinned so the set always has the configured size
            self.hotspots =
                HotspotSet::generate(self.config.num_hotspots, self.settings.width, &mut self.rng);
            debug!(num_hotspots = self.config.num_hotspots, "hotspot count changed");
        }

        if intent.fire_power_delta != 0 && self.config.adjust_fire_power(intent.fire_power_delta) {
            debug!(fire_power = self.config.fire_power, "fire power changed");
        }

        if intent.cycle_palette {
            let next = self.palettes.next(self.active_palette);
            self.select_palette(next);
        }

        if intent.pin_toggled {
            self.config.hotspots_pinned = !self.config.hotspots_pinned;
            debug!(pinned = self.config.hotspots_pinned, "hotspot pinning toggled");
        }

        if intent.help_toggled {
            self.show_help = !self.show_help;
        }
    }

    fn step_physics(&mut self, pointer: Option<(i32, i32)>) {
        self.flame_height = 0;

        if !self.config.hotspots_pinned {
            self.hotspots =
                HotspotSet::generate(self.config.num_hotspots, self.settings.width, &mut self.rng);
        }
        self.hotspots.seed(&mut self.current);

        let params = DiffusionParams {
            scroll_offset: self.scroll_offset,
            flame_threshold: self.settings.flame_threshold,
        };
        self.flame_height = step_diffusion(&self.current, &mut self.next, &self.cooling, params);
        self.next.copy_edge_columns_from(&self.current);

        inject_sparkle(
            &mut self.next,
            self.flame_height,
            self.settings.sparkle_params(),
            &mut self.rng,
        );

        if let Some((x, y)) = pointer {
            self.stamp_pointer(x, y);
        }
    }

    /// Stamp a disc of fire under the pointer, away from the edges.
    fn stamp_pointer(&mut self, x: i32, y: i32) {
        let margin = self.settings.ignition_margin;
        let width = self.settings.width as i32;
        let height = self.settings.height as i32;
        if x > margin && x < width - margin && y > margin && y < height - margin {
            draw_disc(&mut self.next, x, y, self.settings.ignition_radius);
            debug!(x, y, "pointer ignition");
        }
    }

    fn render(&mut self) {
        let table = self.palettes.table_at(self.active_palette);
        map_to_rgba(&self.current, table, &mut self.frame);
        if self.palette_preview_visible() {
            draw_preview_strip(table, self.settings.preview_strip(), &mut self.frame);
        }
    }

    /// Make `index` the active palette and show its preview strip.
    ///
    /// Out-of-range indices are clamped to the last palette.
    pub fn select_palette(&mut self, index: usize) {
        self.active_palette = index.min(self.palettes.count() - 1);
        let duration = f64::from(self.settings.palette_preview_secs);
        self.preview_expires_at = Some(self.clock + duration);
        debug!(
            index = self.active_palette,
            name = self.palettes.name_at(self.active_palette),
            "palette selected"
        );
    }

    /// Replace the hotspot set with explicit columns and pin it.
    ///
    /// Columns are clamped like random draws and the hotspot count follows
    /// the new set.
    pub fn set_hotspots(&mut self, columns: impl IntoIterator<Item = usize>) {
        self.hotspots = HotspotSet::from_columns(columns, self.settings.width);
        self.config.num_hotspots = self.hotspots.len();
        self.config.hotspots_pinned = true;
    }

    /// Session settings
    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    /// Live configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Running or paused
    pub fn state(&self) -> RunState {
        if self.config.paused {
            RunState::Paused
        } else {
            RunState::Running
        }
    }

    /// The displayed heat field
    pub fn intensity(&self) -> &IntensityGrid {
        &self.current
    }

    /// The static cooling field
    pub fn cooling(&self) -> &CoolingGrid {
        &self.cooling
    }

    /// Row offset into the cooling field for the next frame
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Hotspots used on the last running frame
    pub fn hotspots(&self) -> &HotspotSet {
        &self.hotspots
    }

    /// Flame height measured on the last running frame
    pub fn flame_height(&self) -> usize {
        self.flame_height
    }

    /// Available palettes
    pub fn palettes(&self) -> &PaletteLibrary {
        &self.palettes
    }

    /// Index of the active palette
    pub fn active_palette(&self) -> usize {
        self.active_palette
    }

    /// Help overlay requested
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Whether the preview strip is drawn this frame
    pub fn palette_preview_visible(&self) -> bool {
        self.preview_expires_at
            .is_some_and(|expires_at| self.clock < expires_at)
    }

    /// Last finished frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Seconds of session time elapsed
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Overlay data for the current frame
    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            num_hotspots: self.config.num_hotspots,
            fire_power: self.config.fire_power,
            palette_index: self.active_palette,
            palette_name: self.palettes.name_at(self.active_palette).to_owned(),
            paused: self.config.paused,
            show_help: self.show_help,
            hotspots_pinned: self.config.hotspots_pinned,
            palette_preview_visible: self.palette_preview_visible(),
            flame_height: self.flame_height,
            frame: self.frame_count,
            last_step_ms: self.frame_timer.last_frame_time_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(width: usize, height: usize, config: SimulationConfig) -> FireSimulation {
        FireSimulation::seeded(EffectSettings::with_size(width, height), config, 7)
            .expect("valid settings")
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let result = FireSimulation::seeded(
            EffectSettings::with_size(2, 2),
            SimulationConfig::default(),
            1,
        );
        assert!(matches!(
            result.err(),
            Some(SimulationError::InvalidDimensions { width: 2, height: 2 })
        ));
    }

    #[test]
    fn test_initial_state() {
        let sim = session(64, 48, SimulationConfig::default());
        assert_eq!(sim.state(), RunState::Running);
        assert_eq!(sim.hotspots().len(), 152);
        assert!(sim.show_help());
        assert!(sim.palette_preview_visible());
        assert_eq!(sim.frame().width(), 64);
        assert!(sim.intensity().as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_config_is_clamped_on_construction() {
        let sim = session(
            64,
            48,
            SimulationConfig {
                num_hotspots: 5_000,
                fire_power: 50,
                ..SimulationConfig::default()
            },
        );
        assert_eq!(sim.config().num_hotspots, MAX_HOTSPOTS);
        assert_eq!(sim.config().fire_power, MAX_FIRE_POWER);
        assert_eq!(sim.hotspots().len(), MAX_HOTSPOTS);
    }

    #[test]
    fn test_intents_adjust_configuration() {
        let mut sim = session(64, 48, SimulationConfig::default());
        let intent = InputIntent {
            hotspot_delta: -150,
            fire_power_delta: 1,
            help_toggled: true,
            ..InputIntent::none()
        };
        sim.advance(&intent, 1.0 / 60.0);
        assert_eq!(sim.config().num_hotspots, 2);
        assert_eq!(sim.hotspots().len(), 2);
        assert_eq!(sim.config().fire_power, 3);
        assert!(!sim.show_help());
    }

    #[test]
    fn test_hotspot_change_resizes_pinned_set() {
        let mut sim = session(64, 48, SimulationConfig::default());
        sim.advance(
            &InputIntent {
                pin_toggled: true,
                ..InputIntent::none()
            },
            0.0,
        );
        sim.advance(
            &InputIntent {
                hotspot_delta: 10,
                ..InputIntent::none()
            },
            0.0,
        );
        assert!(sim.config().hotspots_pinned);
        assert_eq!(sim.hotspots().len(), 162);
    }

    #[test]
    fn test_palette_preview_expires() {
        let mut sim = session(64, 48, SimulationConfig::default());
        sim.advance(&InputIntent::none(), 1.5);
        assert!(sim.palette_preview_visible());
        sim.advance(&InputIntent::none(), 0.6);
        assert!(!sim.palette_preview_visible());

        let cycle = InputIntent {
            cycle_palette: true,
            ..InputIntent::none()
        };
        sim.advance(&cycle, 0.1);
        assert_eq!(sim.active_palette(), 1);
        assert!(sim.palette_preview_visible());
        assert!(sim.snapshot().palette_preview_visible);
        sim.advance(&InputIntent::none(), 2.0);
        assert!(!sim.palette_preview_visible());
    }

    #[test]
    fn test_preview_expires_late_in_a_long_session() {
        let mut sim = session(32, 24, SimulationConfig::default());
        // Past 2^19 seconds an f32 clock can no longer absorb a 1/60 s tick
        sim.advance(&InputIntent::none(), 524_288.0);
        let start = sim.clock();

        let cycle = InputIntent {
            cycle_palette: true,
            ..InputIntent::none()
        };
        sim.advance(&cycle, 1.0 / 60.0);
        assert!(sim.palette_preview_visible());

        for _ in 0..600 {
            sim.advance(&InputIntent::none(), 1.0 / 60.0);
        }
        assert!(sim.clock() > start + 9.9, "clock stalled at {}", sim.clock());
        assert!(!sim.palette_preview_visible());
    }

    #[test]
    fn test_pointer_respects_margin() {
        let config = SimulationConfig {
            num_hotspots: 0,
            fire_power: 0,
            ..SimulationConfig::default()
        };
        let settings = EffectSettings {
            sparkle_probability: 0.0,
            noise_amplitude: 0.0,
            ..EffectSettings::with_size(64, 48)
        };

        let mut sim = FireSimulation::seeded(settings.clone(), config, 1).expect("valid");
        sim.advance(&InputIntent::press_at(10, 24), 0.0);
        assert!(sim.intensity().visible().iter().all(|&v| v == 0));

        let mut sim = FireSimulation::seeded(settings, config, 1).expect("valid");
        sim.advance(&InputIntent::press_at(32, 24), 0.0);
        assert_eq!(sim.intensity().get(33, 24), 255);
        assert_eq!(sim.intensity().get(32, 15), 255);
    }

    #[test]
    fn test_snapshot_reports_state() {
        let mut sim = session(64, 48, SimulationConfig::default());
        sim.advance(&InputIntent::none(), 0.016);
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.num_hotspots, 152);
        assert_eq!(snapshot.fire_power, 2);
        assert_eq!(snapshot.palette_name, "Black_Red_Yellow_White");
        assert_eq!(snapshot.frame, 1);
        assert!(!snapshot.paused);
        assert!(snapshot.last_step_ms >= 0.0);
    }
}

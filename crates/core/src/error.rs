//! Session construction errors
//!
//! The frame loop itself never fails: every numeric path clamps. The only
//! fallible step is building a session from [`EffectSettings`].
//!
//! [`EffectSettings`]: crate::simulation::EffectSettings

use std::fmt;

/// Error returned when a fire session cannot be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Grid too small for the stencil and the 3-pixel hotspot mark
    InvalidDimensions {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
    },
    /// A session setting is outside its accepted range
    InvalidSetting {
        /// Name of the offending setting
        name: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl SimulationError {
    pub(crate) fn invalid_setting(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid grid dimensions {width}x{height}: need at least 4 columns and 2 rows"
            ),
            Self::InvalidSetting { name, message } => {
                write!(f, "Setting '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

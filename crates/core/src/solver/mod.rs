//! Fire simulation solver module
//!
//! The per-frame physics of the effect, split by concern:
//!
//! - [`noise`] / [`cooling`]: the static cooling field, sampled once per session
//! - [`hotspots`]: ignition columns on the virtual bottom row
//! - [`diffusion`]: the averaging stencil with scrolled cooling and flame height
//! - [`circle`]: midpoint ring stamping shared by sparks and pointer ignition
//! - [`sparkle`]: random sparks below the flame front
//!
//! Every function that needs randomness takes the RNG as a parameter, so a
//! seeded generator reproduces a run exactly.

pub mod circle;
pub mod cooling;
pub mod diffusion;
pub mod hotspots;
pub mod noise;
pub mod sparkle;

// Re-exports
pub use circle::{circle_points, draw_circle, draw_disc};
pub use cooling::{generate_cooling_field, CoolingParams};
pub use diffusion::{step_diffusion, DiffusionParams, DEFAULT_FLAME_THRESHOLD};
pub use hotspots::{clamp_column, HotspotSet};
pub use noise::{NoiseGenerator, NoiseOctave};
pub use sparkle::{inject_sparkle, SparkleParams};

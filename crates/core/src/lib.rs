//! Fire Effect Core Library
//!
//! A palette-indexed procedural fire: a grid of heat intensities is seeded
//! along a virtual row below the screen, diffused upward one row per frame,
//! cooled by a scrolling noise field, sprinkled with sparks and finally mapped
//! through a 256-entry color gradient into an RGBA frame.
//!
//! Window creation, input polling, audio and text overlays are left to the
//! embedding application. It hands [`FireSimulation::advance`] one
//! [`InputIntent`] per frame and presents the returned [`FrameBuffer`].
//!
//! ```rust,ignore
//! use fire_effect_core::{EffectSettings, FireSimulation, InputIntent};
//!
//! let mut sim = FireSimulation::new(EffectSettings::default())?;
//! let frame = sim.advance(&InputIntent::none(), 1.0 / 60.0);
//! present(frame.pixels());
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Per-frame physics, palettes and the session controller
pub mod palette;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use core_types::{CoolingGrid, IntensityGrid, Rgba, MAX_INTENSITY};
pub use error::SimulationError;

// Re-export palette and controller types
pub use palette::{FrameBuffer, PaletteLibrary, PaletteTable};
pub use simulation::{
    EffectSettings, FireSimulation, InputIntent, OverlaySnapshot, PointerState, RunState,
    SimulationConfig,
};
pub use solver::HotspotSet;

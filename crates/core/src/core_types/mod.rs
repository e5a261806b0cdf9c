//! Core types and utilities

pub mod color;
pub mod grid;

pub use color::Rgba;
pub use grid::{CoolingGrid, IntensityGrid, MAX_INTENSITY};

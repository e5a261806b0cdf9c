//! Color palettes and the intensity → RGBA mapper

pub mod library;
pub mod mapper;

pub use library::{GradientSegment, PaletteLibrary, PaletteTable, PALETTE_SIZE};
pub use mapper::{draw_preview_strip, map_to_rgba, FrameBuffer, PreviewStrip, BYTES_PER_PIXEL};

//! Intensity → RGBA conversion
//!
//! A straight table lookup per cell. The ignition row is never shown.

use super::library::{PaletteTable, PALETTE_SIZE};
use crate::core_types::IntensityGrid;
use rayon::prelude::*;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Finished RGBA frame, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    /// Transparent black frame
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    /// Frame width in pixels
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA bytes of the pixel at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if the coordinates fall outside the frame
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "Coordinates out of bounds");
        let start = (y * self.width + x) * BYTES_PER_PIXEL;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[start..start + BYTES_PER_PIXEL]);
        out
    }
}

/// Where and how tall the palette preview strip is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewStrip {
    /// Left edge in pixels
    pub x: usize,
    /// Top edge in pixels
    pub y: usize,
    /// Strip height in rows
    pub height: usize,
}

impl Default for PreviewStrip {
    fn default() -> Self {
        Self {
            x: 20,
            y: 100,
            height: 5,
        }
    }
}

/// Paint every visible cell of `grid` with its palette color.
///
/// # Panics
///
/// Panics if the frame and grid sizes differ
pub fn map_to_rgba(grid: &IntensityGrid, table: &PaletteTable, frame: &mut FrameBuffer) {
    assert!(
        frame.width == grid.width() && frame.height == grid.height(),
        "Frame size must match grid size"
    );

    frame
        .pixels
        .par_chunks_mut(BYTES_PER_PIXEL)
        .zip(grid.visible().par_iter())
        .for_each(|(pixel, &intensity)| {
            pixel.copy_from_slice(&table.color(intensity).to_bytes());
        });
}

/// Overlay the whole gradient as a horizontal strip, one column per entry,
/// clipped to the frame.
pub fn draw_preview_strip(table: &PaletteTable, strip: PreviewStrip, frame: &mut FrameBuffer) {
    let width = frame.width;
    let rows = strip.y..strip.y.saturating_add(strip.height).min(frame.height);
    for y in rows {
        for (i, color) in table.colors().iter().enumerate().take(PALETTE_SIZE) {
            let x = strip.x.saturating_add(i);
            if x >= width {
                break;
            }
            let start = (y * width + x) * BYTES_PER_PIXEL;
            frame.pixels[start..start + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
        }
    }
}

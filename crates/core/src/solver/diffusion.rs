//! Heat diffusion stencil
//!
//! One explicit sweep per frame. For every interior column and every source
//! row `y` in `1..=height`:
//!
//! ```text
//! avg  = (right + left + above)         / 3   if y is the ignition row
//! avg  = (right + left + below + above) / 4   otherwise
//! next[x, y - 1] = clamp(avg - cooling[x, (y + scroll) % height], 0, 255)
//! ```
//!
//! Writing the result one row higher is what makes the flames rise. Columns
//! `0` and `width - 1` are never written and the ignition row of `next` is
//! left alone.

use crate::core_types::{CoolingGrid, IntensityGrid};
use rayon::prelude::*;

/// Default intensity above which a cell counts as flame
pub const DEFAULT_FLAME_THRESHOLD: u8 = 20;

/// Per-frame parameters for the diffusion step
#[derive(Debug, Clone, Copy)]
pub struct DiffusionParams {
    /// Row offset into the cooling grid for this frame
    pub scroll_offset: usize,
    /// Intensities strictly above this count towards flame height
    pub flame_threshold: u8,
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            flame_threshold: DEFAULT_FLAME_THRESHOLD,
        }
    }
}

/// New intensity for interior column `x` of source row `y`.
#[inline]
fn diffused(
    current: &[u8],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    cooling: u8,
) -> u8 {
    let idx = y * width + x;
    let right = u16::from(current[idx + 1]);
    let left = u16::from(current[idx - 1]);
    let above = u16::from(current[idx - width]);

    let average = if y == height {
        (right + left + above) / 3
    } else {
        let below = u16::from(current[idx + width]);
        (right + left + below + above) / 4
    };

    // Averages of bytes never exceed 255
    average.saturating_sub(u16::from(cooling)) as u8
}

/// Run one diffusion sweep from `current` into `next`.
///
/// Rows of `next` are computed in parallel; each destination row depends
/// only on `current`, so the result is deterministic.
///
/// Returns the flame height: the largest `height - y` over source rows `y`
/// holding a cell hotter than the threshold, or 0 if there is none.
///
/// # Panics
///
/// Panics if the grids do not share dimensions
pub fn step_diffusion(
    current: &IntensityGrid,
    next: &mut IntensityGrid,
    cooling: &CoolingGrid,
    params: DiffusionParams,
) -> usize {
    let width = current.width();
    let height = current.height();
    assert!(
        next.width() == width
            && next.height() == height
            && cooling.width() == width
            && cooling.height() == height,
        "Grid dimensions must match"
    );

    let src = current.as_slice();
    let (visible, _) = next.split_ignition_mut();

    visible
        .par_chunks_mut(width)
        .enumerate()
        .map(|(dest_row, row)| {
            let y = dest_row + 1;
            let mut is_flame = false;
            for x in 1..width - 1 {
                let cool = cooling.scrolled(x, y, params.scroll_offset);
                let value = diffused(src, width, height, x, y, cool);
                is_flame |= value > params.flame_threshold;
                row[x] = value;
            }
            if is_flame {
                height - y
            } else {
                0
            }
        })
        .max()
        .unwrap_or(0)
}

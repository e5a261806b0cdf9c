//! Hotspot placement on the ignition row
//!
//! A hotspot is a 3-pixel-wide mark `{x-1, x, x+1}` on the virtual ignition
//! row. Columns are clamped into `[2, width-2]` so the mark never touches the
//! outermost columns.

use crate::core_types::{IntensityGrid, MAX_INTENSITY};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Columns ignited this frame, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotSet {
    columns: Vec<usize>,
}

/// Clamp a column into the range a hotspot mark may occupy.
#[inline]
#[must_use]
pub fn clamp_column(x: usize, width: usize) -> usize {
    x.clamp(2, width.saturating_sub(2).max(2))
}

impl HotspotSet {
    /// Draw `count` uniformly random columns in `[0, width)`, each clamped
    /// into `[2, width-2]`.
    pub fn generate(count: usize, width: usize, rng: &mut impl Rng) -> Self {
        let columns = (0..count)
            .map(|_| clamp_column(rng.random_range(0..width), width))
            .collect();
        Self { columns }
    }

    /// Use explicit columns, clamped the same way as random draws.
    pub fn from_columns(columns: impl IntoIterator<Item = usize>, width: usize) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(|x| clamp_column(x, width))
                .collect(),
        }
    }

    /// The hotspot columns
    #[must_use]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Number of hotspots
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when nothing is ignited
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Stamp every hotspot onto the ignition row of `grid`.
    ///
    /// The row is cleared first, so only this frame's hotspots burn.
    /// Overlapping marks simply saturate.
    pub fn seed(&self, grid: &mut IntensityGrid) {
        let width = grid.width();
        let (_, ignition) = grid.split_ignition_mut();
        ignition.fill(0);
        for &x in &self.columns {
            let x = clamp_column(x, width);
            ignition[x - 1..=x + 1].fill(MAX_INTENSITY);
        }
    }
}

//! Byte grids for the fire simulation
//!
//! Both grids store one unsigned byte per cell in row-major order
//! (`y * width + x`), row 0 at the top of the screen.

use serde::{Deserialize, Serialize};

/// Maximum heat a cell can hold.
pub const MAX_INTENSITY: u8 = u8::MAX;

/// One frame of the heat field.
///
/// Holds `height` visible rows plus one virtual ignition row below them
/// (row index `height`). Hotspots are stamped into the ignition row and the
/// diffusion stencil reads it as its bottom source row; it is never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityGrid {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl IntensityGrid {
    /// Create a cold grid with `height` visible rows and one ignition row.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; width * (height + 1)],
            width,
            height,
        }
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of visible rows (the ignition row is not counted)
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row index of the virtual ignition row
    #[must_use]
    pub fn ignition_row(&self) -> usize {
        self.height
    }

    /// Flat index of `(x, y)`; `y` may address the ignition row.
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Intensity at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates fall outside the grid (ignition row included)
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(
            x < self.width && y <= self.height,
            "Coordinates out of bounds"
        );
        self.data[self.index(x, y)]
    }

    /// Set intensity at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates fall outside the grid (ignition row included)
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        assert!(
            x < self.width && y <= self.height,
            "Coordinates out of bounds"
        );
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Set `(x, y)` to [`MAX_INTENSITY`] if it lies inside the grid.
    ///
    /// Returns `false` when the point was discarded.
    #[inline]
    pub fn ignite(&mut self, x: i32, y: i32) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        if x >= self.width || y > self.height {
            return false;
        }
        let idx = self.index(x, y);
        self.data[idx] = MAX_INTENSITY;
        true
    }

    /// All cells, ignition row last
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of all cells, ignition row last
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The visible rows only
    #[must_use]
    pub fn visible(&self) -> &[u8] {
        &self.data[..self.width * self.height]
    }

    /// Split into (visible rows, ignition row) for disjoint mutation
    pub fn split_ignition_mut(&mut self) -> (&mut [u8], &mut [u8]) {
        self.data.split_at_mut(self.width * self.height)
    }

    /// Zero the ignition row.
    pub fn clear_ignition_row(&mut self) {
        self.split_ignition_mut().1.fill(0);
    }

    /// Copy the leftmost and rightmost visible columns from `other`.
    ///
    /// The stencil never writes these columns, so after a buffer swap they
    /// would otherwise show whatever the back buffer held two frames ago.
    ///
    /// # Panics
    ///
    /// Panics if the grids do not share dimensions
    pub fn copy_edge_columns_from(&mut self, other: &IntensityGrid) {
        assert!(
            self.width == other.width && self.height == other.height,
            "Grid dimensions must match"
        );
        let last = self.width - 1;
        for y in 0..self.height {
            let row = y * self.width;
            self.data[row] = other.data[row];
            self.data[row + last] = other.data[row + last];
        }
    }

    /// Fill every cell (ignition row included) with `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }
}

/// Static subtractive cooling field.
///
/// Same visible dimensions as the [`IntensityGrid`] it cools. Built once per
/// session and only ever read, at a vertically wrapped row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoolingGrid {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl CoolingGrid {
    /// A field that removes no heat anywhere
    #[must_use]
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; width * height],
            width,
            height,
        }
    }

    /// Wrap precomputed cooling amounts.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height`
    #[must_use]
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "Cooling data does not match grid dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cooling at column `x` of source row `y`, shifted down by
    /// `scroll_offset` rows and wrapped vertically.
    #[inline]
    #[must_use]
    pub fn scrolled(&self, x: usize, y: usize, scroll_offset: usize) -> u8 {
        let row = (y + scroll_offset) % self.height;
        self.data[row * self.width + x]
    }

    /// Cooling at `(x, y)` without scrolling.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates fall outside the grid
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// All cooling amounts in row-major order
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

//! Named 256-entry color gradients
//!
//! Each built-in palette is a piecewise-linear ramp: a run of segments, each
//! covering a contiguous index range and interpolating every channel from a
//! start color towards an end color.

use crate::core_types::Rgba;
use rustc_hash::FxHashMap;

/// Number of entries in every palette
pub const PALETTE_SIZE: usize = 256;

/// One linear run of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientSegment {
    /// Number of palette entries covered
    pub len: usize,
    /// Color of the first entry
    pub from: Rgba,
    /// Color the run approaches (reached one entry past its end)
    pub to: Rgba,
}

impl GradientSegment {
    /// Segment of `len` entries from `from` towards `to`
    #[must_use]
    pub const fn new(len: usize, from: Rgba, to: Rgba) -> Self {
        Self { len, from, to }
    }

    fn color_at(&self, step: usize) -> Rgba {
        let lerp = |a: u8, b: u8| -> u8 {
            let (a, b) = (i64::from(a), i64::from(b));
            let value = a + (b - a) * step as i64 / self.len as i64;
            value.clamp(0, 255) as u8
        };
        Rgba {
            r: lerp(self.from.r, self.to.r),
            g: lerp(self.from.g, self.to.g),
            b: lerp(self.from.b, self.to.b),
            a: lerp(self.from.a, self.to.a),
        }
    }
}

/// A 256-entry gradient. Index 0 is the coldest color, 255 the hottest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    colors: [Rgba; PALETTE_SIZE],
}

impl PaletteTable {
    /// Build a table from consecutive segments.
    ///
    /// Segments are laid end to end from index 0. Entries past the last
    /// segment repeat its final color; segments past index 255 are cut off.
    #[must_use]
    pub fn from_segments(segments: &[GradientSegment]) -> Self {
        let mut colors = [Rgba::BLACK; PALETTE_SIZE];
        let mut index = 0;

        for segment in segments {
            for step in 0..segment.len {
                if index == PALETTE_SIZE {
                    return Self { colors };
                }
                colors[index] = segment.color_at(step);
                index += 1;
            }
        }

        if index > 0 {
            let last = colors[index - 1];
            colors[index..].fill(last);
        }
        Self { colors }
    }

    /// Color for an intensity
    #[inline]
    #[must_use]
    pub fn color(&self, intensity: u8) -> Rgba {
        self.colors[usize::from(intensity)]
    }

    /// All entries, coldest first
    #[must_use]
    pub fn colors(&self) -> &[Rgba; PALETTE_SIZE] {
        &self.colors
    }

    /// Black → red → yellow → white
    #[must_use]
    pub fn black_red_yellow_white() -> Self {
        let red = Rgba::opaque(255, 0, 0);
        let yellow = Rgba::opaque(255, 255, 0);
        Self::from_segments(&[
            GradientSegment::new(64, Rgba::BLACK, red),
            GradientSegment::new(128, red, yellow),
            GradientSegment::new(64, yellow, Rgba::WHITE),
        ])
    }

    /// Black → yellow → white
    #[must_use]
    pub fn black_yellow_white() -> Self {
        let yellow = Rgba::opaque(255, 255, 0);
        Self::from_segments(&[
            GradientSegment::new(128, Rgba::BLACK, yellow),
            GradientSegment::new(128, yellow, Rgba::WHITE),
        ])
    }

    /// Plain grayscale ramp
    #[must_use]
    pub fn black_white() -> Self {
        Self::from_segments(&[
            GradientSegment::new(255, Rgba::BLACK, Rgba::WHITE),
            GradientSegment::new(1, Rgba::WHITE, Rgba::WHITE),
        ])
    }

    /// Thermal-camera look: black → violet → blue → red → yellow → white
    #[must_use]
    pub fn predator() -> Self {
        let violet = Rgba::opaque(255, 0, 255);
        let blue = Rgba::opaque(0, 0, 255);
        let red = Rgba::opaque(255, 0, 0);
        let yellow = Rgba::opaque(255, 255, 0);
        Self::from_segments(&[
            GradientSegment::new(51, Rgba::BLACK, violet),
            GradientSegment::new(51, violet, blue),
            GradientSegment::new(51, blue, red),
            GradientSegment::new(51, red, yellow),
            GradientSegment::new(52, yellow, Rgba::WHITE),
        ])
    }
}

/// Every palette available to a session.
///
/// Palettes are stored by name; `labels` fixes the cycling order.
#[derive(Debug, Clone)]
pub struct PaletteLibrary {
    tables: FxHashMap<String, PaletteTable>,
    labels: Vec<String>,
}

impl PaletteLibrary {
    /// Empty library
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: FxHashMap::default(),
            labels: Vec::new(),
        }
    }

    /// The four compiled-in palettes, in cycling order
    #[must_use]
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert("Black_Red_Yellow_White", PaletteTable::black_red_yellow_white());
        library.insert("Black_Yellow_White", PaletteTable::black_yellow_white());
        library.insert("Black_White", PaletteTable::black_white());
        library.insert("Predator", PaletteTable::predator());
        library
    }

    /// Add a palette at the end of the cycle, or replace one with the same name
    pub fn insert(&mut self, name: &str, table: PaletteTable) {
        if self.tables.insert(name.to_owned(), table).is_none() {
            self.labels.push(name.to_owned());
        }
    }

    /// Number of palettes
    #[must_use]
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    /// Clamp an index into range; out-of-range requests are caller bugs.
    fn checked(&self, index: usize) -> usize {
        debug_assert!(
            index < self.count(),
            "Palette index {index} out of range (count {})",
            self.count()
        );
        index.min(self.count().saturating_sub(1))
    }

    /// Name of the palette at `index`
    ///
    /// # Panics
    ///
    /// Panics if the library is empty
    #[must_use]
    pub fn name_at(&self, index: usize) -> &str {
        &self.labels[self.checked(index)]
    }

    /// Table of the palette at `index`
    ///
    /// # Panics
    ///
    /// Panics if the library is empty
    #[must_use]
    pub fn table_at(&self, index: usize) -> &PaletteTable {
        &self.tables[self.name_at(index)]
    }

    /// Index after `index`, wrapping to 0
    #[must_use]
    pub fn next(&self, index: usize) -> usize {
        if self.count() == 0 {
            return 0;
        }
        (self.checked(index) + 1) % self.count()
    }

    /// Position of a palette in the cycle
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label == name)
    }

    /// Palette names in cycling order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for PaletteLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Pixel color type shared by palettes and the frame buffer

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Opaque color from red, green and blue channels
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels in RGBA byte order
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order_is_rgba() {
        assert_eq!(Rgba::opaque(1, 2, 3).to_bytes(), [1, 2, 3, 255]);
        assert_eq!(Rgba::default().to_bytes(), [0, 0, 0, 0]);
    }
}

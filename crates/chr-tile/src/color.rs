//! RGBA color type
//!
//! Colors here are 8-bit-per-channel byte tuples, compared exactly.
//! The only derived quantity is [`luma()`](Rgba::luma), used to order
//! palette entries by brightness; it is never stored.

/// An 8-bit-per-channel RGBA color.
///
/// Equality is byte-exact: two colors are the same palette entry if and
/// only if all four channels match. Use [`from_rgb`](Rgba::from_rgb)
/// for opaque colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0 = fully transparent, 255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Create an opaque color from RGB channels.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from all four channels.
    #[inline]
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to a byte array `[R, G, B, A]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Perceived brightness using the Rec. 601 luma weights
    /// (0.299 R + 0.587 G + 0.114 B).
    ///
    /// Alpha does not contribute. The result is only meaningful for
    /// *ordering* colors; it is not a colorimetric quantity.
    ///
    /// # Example
    ///
    /// ```
    /// use chr_tile::Rgba;
    ///
    /// let black = Rgba::from_rgb(0, 0, 0);
    /// let white = Rgba::from_rgb(255, 255, 255);
    /// assert!(black.luma() < white.luma());
    /// ```
    #[inline]
    pub fn luma(self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }
}

//! Unified error type for the chr-tile public API.
//!
//! [`EncodeError`] wraps every failure the encoding pipeline can hit
//! into a single enum for convenient `?` propagation. All variants are
//! structural: they abort the whole conversion, because a skipped or
//! substituted tile would silently shift every subsequent tile's
//! position in the output stream. Recoverable conditions (margins,
//! size limits) travel as [`Warning`](crate::stream::Warning) values
//! instead.

use thiserror::Error;

use crate::palette::PaletteError;

/// Unified error type for the chr-tile public API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A tile region was not exactly `size x size` pixels.
    #[error("tile region holds {actual} pixels, expected {expected} for a {size}x{size} tile")]
    Shape {
        /// Pixels supplied.
        actual: usize,
        /// Pixels required (`size * size`).
        expected: usize,
        /// Configured tile edge length.
        size: usize,
    },

    /// Tile size outside the representable range.
    ///
    /// Each bitplane stores one byte per tile row, so the edge length
    /// is limited to 8 pixels.
    #[error("tile size {size} is not in the supported range 1..=8")]
    TileSize {
        /// The rejected tile size.
        size: usize,
    },

    /// The image pixel buffer does not match the declared dimensions.
    #[error("pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    PixelBuffer {
        /// Pixels supplied.
        actual: usize,
        /// Pixels required (`width * height`).
        expected: usize,
        /// Declared image width.
        width: usize,
        /// Declared image height.
        height: usize,
    },

    /// Palette construction or quantization failed.
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

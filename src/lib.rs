//! chrpack: convert images to NES CHR tile data.
//!
//! Thin application layer around the [`chr_tile`] core: PNG decoding,
//! option plumbing and file output. For the most predictable results
//! the input should be authored against the format's constraints --
//! complete 8x8 tiles, at most four colors per tile (or three plus
//! transparency). Color reduction is deliberately not performed here;
//! a tile with too many colors is an error, not an approximation.

pub mod convert;
pub mod decode;
pub mod error;

pub use convert::{convert_file, convert_image, ConvertOptions};
pub use decode::{decode_png, load_png, DecodedImage};
pub use error::ConvertError;

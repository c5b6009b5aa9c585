//! chr-tile: NES CHR 2bpp tile encoding
//!
//! This library converts decoded pixel data into the packed
//! 2-bits-per-pixel tile format ("CHR") consumed by 8-bit console
//! graphics hardware. Each 8x8 tile becomes two parallel 8-byte
//! bitplanes; combining the corresponding bit from each plane yields a
//! pixel's 2-bit color index.
//!
//! # Quick Start
//!
//! The [`ChrEncoder`] builder is the primary entry point:
//!
//! ```
//! use chr_tile::{ChrEncoder, Rgba};
//!
//! // A 16x8 image: two tiles side by side.
//! let pixels = vec![Rgba::from_rgb(0, 0, 0); 16 * 8];
//! let output = ChrEncoder::new().encode(&pixels, 16, 8).unwrap();
//!
//! assert_eq!(output.tile_count(), 2);
//! assert_eq!(output.len(), 32); // 16 bytes per tile
//! ```
//!
//! # Pipeline
//!
//! ```text
//! decoded image (Rgba pixels)
//!     |
//!     v  per 8x8 region, in scan order
//! TileQuantizer        (external seam: reduce to <= 4 color buckets;
//!     |                 the shipped ExactQuantizer does no reduction)
//!     v
//! TilePalette::normalize()   (brightness ascending, transparent -> 0)
//!     |
//!     v
//! Tile::encode()       (two bitplanes, MSB = left-most pixel)
//!     |
//!     v
//! ChrOutput            (concatenated stream + warnings + padding)
//! ```
//!
//! # Format rules
//!
//! The stream carries no tile markers: a tile's position in the buffer
//! IS its index. That shapes two policies:
//!
//! - Structural failures (bad region shape, more than four colors)
//!   abort the whole conversion. Skipping a tile would silently shift
//!   every tile after it.
//! - Size and margin conditions are non-fatal [`Warning`] values on
//!   the output, never errors: partial edge strips are ignored, the
//!   soft 4096-byte bank threshold warns once and keeps writing, and
//!   a hard [`byte_limit`](ChrEncoder::byte_limit) truncates cleanly
//!   on a whole-tile boundary.
//!
//! Canonical index 0 is what the hardware treats as background, so
//! normalization pins the transparent entry (or, absent transparency,
//! the darkest color) there.
//!
//! # Historical variants
//!
//! Earlier generations of this tooling disagreed on plane emission
//! order and on padding defaults. Both are explicit configuration
//! here rather than baked-in guesses: [`PlaneOrder`] selects which
//! bitplane leads, and [`ChrEncoder::pad_to_bank`] /
//! [`ChrEncoder::width_multiple`] cover the fixed-4096-byte and
//! tile-multiple padding schemes. The default is the canonical layout
//! with no padding.

pub mod color;
pub mod error;
pub mod palette;
pub mod quantize;
pub mod stream;
pub mod tile;


pub use color::Rgba;
pub use error::EncodeError;
pub use palette::{PaletteError, TilePalette, MAX_COLORS};
pub use quantize::{ExactQuantizer, QuantizedTile, TileQuantizer, OPAQUE_ALPHA_THRESHOLD};
pub use stream::{ChrEncoder, ChrOutput, ScanOrder, Warning, CHR_BANK_BYTES};
pub use tile::{PlaneOrder, Tile, BYTES_PER_TILE, TILE_SIZE};

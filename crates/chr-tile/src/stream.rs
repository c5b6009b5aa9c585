//! Stream assembly: walking an image tile by tile into a CHR buffer.
//!
//! [`ChrEncoder`] is the primary entry point for the crate. It wraps
//! the per-tile pipeline (quantize, normalize, bit-pack) behind a
//! fluent builder with the size and ordering policies of the format:
//! scan order, plane order, width-multiple padding, hard byte limits
//! and the legacy fixed-bank padding.
//!
//! Position in the stream IS the tile index: there are no markers, so
//! any structural problem aborts the whole conversion instead of
//! skipping a tile and shifting everything after it.

use std::fmt;

use crate::color::Rgba;
use crate::error::EncodeError;
use crate::quantize::{ExactQuantizer, TileQuantizer};
use crate::tile::{PlaneOrder, Tile, TILE_SIZE};

/// Size of one conventional CHR bank in bytes.
///
/// Used as the soft-limit threshold when no hard byte limit is set,
/// and as the target length for legacy bank padding.
pub const CHR_BANK_BYTES: usize = 4096;

/// Traversal order across the image's tile grid.
///
/// Governs only which tile is visited when; per-tile encoding is
/// unaffected. Column-major supports tall vertical sprite sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Left to right within a tile row, rows top to bottom.
    #[default]
    RowMajor,
    /// Top to bottom within a tile column, columns left to right.
    ColumnMajor,
}

/// Non-fatal conditions reported alongside the output buffer.
///
/// Warnings are a side channel, not exceptions: the conversion
/// completed (possibly partially, for [`Truncated`](Warning::Truncated))
/// and the caller decides whether to log, surface or ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Image dimensions are not multiples of the tile size; the
    /// trailing partial strip of pixels was ignored.
    PartialMargin {
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
        /// Tile size the margins were measured against.
        tile_size: usize,
    },
    /// The output grew past the conventional bank size. Emitted once
    /// per call, the first time the threshold is crossed; writing
    /// continues unchecked afterwards.
    SoftLimitExceeded {
        /// The threshold that was crossed ([`CHR_BANK_BYTES`]).
        limit: usize,
    },
    /// A hard byte limit stopped the conversion early. Bytes already
    /// written remain valid; the reported tile was not written.
    Truncated {
        /// The configured hard limit.
        limit: usize,
        /// Whole tiles written before the stop.
        tiles_written: usize,
    },
    /// Requested padding would have pushed the output past the hard
    /// byte limit; zero bytes were appended only up to the limit. All
    /// image tiles were written, so this is not a truncation.
    PaddingCapped {
        /// The configured hard limit.
        limit: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::PartialMargin {
                width,
                height,
                tile_size,
            } => write!(
                f,
                "image is {width}x{height}, not a multiple of {tile_size}; partial edge tiles ignored"
            ),
            Warning::SoftLimitExceeded { limit } => {
                write!(f, "output exceeds the conventional {limit}-byte CHR bank")
            }
            Warning::Truncated {
                limit,
                tiles_written,
            } => write!(
                f,
                "stopped after {tiles_written} tiles: next tile would exceed the {limit}-byte limit"
            ),
            Warning::PaddingCapped { limit } => {
                write!(f, "padding stopped at the {limit}-byte limit")
            }
        }
    }
}

/// The assembled CHR stream plus everything the caller should know
/// about how it was produced.
///
/// Owned byte buffer, tile count, accumulated [`Warning`]s and the
/// truncation flag. The buffer layout is part of the format contract:
/// tiles in scan order, `2 * tile_size` bytes each, planes per the
/// configured [`PlaneOrder`], then any padding bytes (all zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChrOutput {
    bytes: Vec<u8>,
    tile_count: usize,
    warnings: Vec<Warning>,
    truncated: bool,
}

impl ChrOutput {
    /// The encoded stream.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the output, returning the owned buffer.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length of the stream in bytes, padding included.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes were produced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whole tiles encoded from the image (padding tiles excluded).
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Non-fatal conditions encountered during assembly.
    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns true if a hard byte limit cut the conversion short.
    ///
    /// The buffer is still valid output for the tiles it contains,
    /// but the requested image is incomplete; the caller decides
    /// whether to keep or discard it.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// CHR stream encoder with fluent configuration.
///
/// `ChrEncoder` is the recommended entry point. Configuration methods
/// consume and return `self`; [`encode()`](Self::encode) takes `&self`
/// so one configured encoder is reusable across images. The quantizer
/// collaborator is a type parameter so callers can plug in their own
/// color reduction; the default [`ExactQuantizer`] accepts only
/// regions already within the 4-color budget.
///
/// # Example
///
/// ```
/// use chr_tile::{ChrEncoder, Rgba};
///
/// // A single 8x8 tile of solid color: 16 bytes out.
/// let pixels = vec![Rgba::from_rgb(0, 0, 0); 64];
/// let output = ChrEncoder::new().encode(&pixels, 8, 8).unwrap();
///
/// assert_eq!(output.tile_count(), 1);
/// assert_eq!(output.len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct ChrEncoder<Q = ExactQuantizer> {
    quantizer: Q,
    tile_size: usize,
    scan_order: ScanOrder,
    plane_order: PlaneOrder,
    width_multiple: usize,
    byte_limit: usize,
    pad_to_bank: bool,
}

impl ChrEncoder<ExactQuantizer> {
    /// Create an encoder with the default quantizer and canonical
    /// settings: 8-pixel tiles, row-major scan, low plane first, no
    /// padding, soft bank limit.
    pub fn new() -> Self {
        Self::with_quantizer(ExactQuantizer)
    }
}

impl Default for ChrEncoder<ExactQuantizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: TileQuantizer> ChrEncoder<Q> {
    /// Create an encoder around a custom quantizer collaborator.
    pub fn with_quantizer(quantizer: Q) -> Self {
        Self {
            quantizer,
            tile_size: TILE_SIZE,
            scan_order: ScanOrder::default(),
            plane_order: PlaneOrder::default(),
            width_multiple: 1,
            byte_limit: 0,
            pad_to_bank: false,
        }
    }

    /// Set the tile edge length (1..=8; the CHR format itself is 8).
    /// Validated at encode time.
    #[inline]
    pub fn tile_size(mut self, size: usize) -> Self {
        self.tile_size = size;
        self
    }

    /// Set the tile traversal order.
    #[inline]
    pub fn scan_order(mut self, order: ScanOrder) -> Self {
        self.scan_order = order;
        self
    }

    /// Set which bitplane is emitted first within each tile.
    #[inline]
    pub fn plane_order(mut self, order: PlaneOrder) -> Self {
        self.plane_order = order;
        self
    }

    /// Pad the output with zero tiles so the total tile count is a
    /// multiple of `multiple`. `1` (the default) adds no padding.
    /// Ignored when the output was truncated by a hard limit.
    #[inline]
    pub fn width_multiple(mut self, multiple: usize) -> Self {
        self.width_multiple = multiple.max(1);
        self
    }

    /// Set a hard output size limit in bytes. `0` (the default)
    /// disables the hard limit and enables the soft
    /// [`CHR_BANK_BYTES`] warning instead. A tile that would push the
    /// buffer past a non-zero limit is not written and the output is
    /// flagged truncated. Padding never crosses the limit either:
    /// [`width_multiple`](Self::width_multiple) and
    /// [`pad_to_bank`](Self::pad_to_bank) stop at the limit with a
    /// [`Warning::PaddingCapped`].
    #[inline]
    pub fn byte_limit(mut self, limit: usize) -> Self {
        self.byte_limit = limit;
        self
    }

    /// Zero-fill the output to a full [`CHR_BANK_BYTES`] bank when it
    /// comes up short. Legacy behavior of the original tooling;
    /// disabled by default so the output length is the natural tile
    /// count. Ignored when the output was truncated.
    #[inline]
    pub fn pad_to_bank(mut self, enabled: bool) -> Self {
        self.pad_to_bank = enabled;
        self
    }

    /// Encode an image into a CHR stream.
    ///
    /// `pixels` is the decoded image, row-major, `width * height`
    /// entries. Only complete `tile_size`-aligned tiles are encoded;
    /// trailing partial strips are ignored with a
    /// [`Warning::PartialMargin`].
    ///
    /// # Errors
    ///
    /// * [`EncodeError::TileSize`] for a tile size outside `1..=8`.
    /// * [`EncodeError::PixelBuffer`] when `pixels.len()` does not
    ///   match the declared dimensions.
    /// * [`EncodeError::Palette`] when the quantizer cannot express a
    ///   region in four colors.
    ///
    /// Structural errors abort the call; no partial buffer is
    /// returned for them. Size-limit conditions are reported through
    /// [`ChrOutput::warnings`] instead.
    pub fn encode(
        &self,
        pixels: &[Rgba],
        width: usize,
        height: usize,
    ) -> Result<ChrOutput, EncodeError> {
        let ts = self.tile_size;
        if ts == 0 || ts > TILE_SIZE {
            return Err(EncodeError::TileSize { size: ts });
        }
        if pixels.len() != width * height {
            return Err(EncodeError::PixelBuffer {
                actual: pixels.len(),
                expected: width * height,
                width,
                height,
            });
        }

        let tiles_x = width / ts;
        let tiles_y = height / ts;
        let bytes_per_tile = 2 * ts;

        let mut warnings = Vec::new();
        if width % ts != 0 || height % ts != 0 {
            warnings.push(Warning::PartialMargin {
                width,
                height,
                tile_size: ts,
            });
        }

        let mut bytes = Vec::with_capacity(tiles_x * tiles_y * bytes_per_tile);
        let mut tile_count = 0usize;
        let mut truncated = false;
        // Per-call flag, so repeated conversions warn independently.
        let mut soft_warned = false;
        let mut region = vec![Rgba::from_rgb(0, 0, 0); ts * ts];

        'tiles: for (tx, ty) in tile_coords(tiles_x, tiles_y, self.scan_order) {
            if self.byte_limit > 0 {
                if bytes.len() + bytes_per_tile > self.byte_limit {
                    warnings.push(Warning::Truncated {
                        limit: self.byte_limit,
                        tiles_written: tile_count,
                    });
                    truncated = true;
                    break 'tiles;
                }
            } else if !soft_warned && bytes.len() + bytes_per_tile > CHR_BANK_BYTES {
                warnings.push(Warning::SoftLimitExceeded {
                    limit: CHR_BANK_BYTES,
                });
                soft_warned = true;
            }

            // Copy the tile region out row by row.
            for row in 0..ts {
                let src = (ty * ts + row) * width + tx * ts;
                region[row * ts..(row + 1) * ts].copy_from_slice(&pixels[src..src + ts]);
            }

            let quantized = self.quantizer.quantize(&region)?;
            let canonical = quantized.palette.canonical_map();
            let indices: Vec<u8> = quantized
                .indices
                .iter()
                .map(|&i| canonical[i as usize])
                .collect();

            let tile = Tile::from_indices(&indices, ts)?;
            bytes.extend(tile.encode(self.plane_order));
            tile_count += 1;
        }

        if !truncated {
            let mut target = bytes.len();
            if self.width_multiple > 1 {
                let remainder = tile_count % self.width_multiple;
                if remainder != 0 {
                    let missing = self.width_multiple - remainder;
                    target += missing * bytes_per_tile;
                }
            }
            if self.pad_to_bank && target < CHR_BANK_BYTES {
                target = CHR_BANK_BYTES;
            }
            // The hard limit binds padding too; the buffer must never
            // grow past it.
            if self.byte_limit > 0 && target > self.byte_limit {
                target = self.byte_limit;
                warnings.push(Warning::PaddingCapped {
                    limit: self.byte_limit,
                });
            }
            if target > bytes.len() {
                bytes.resize(target, 0);
            }
        }

        Ok(ChrOutput {
            bytes,
            tile_count,
            warnings,
            truncated,
        })
    }
}

/// Tile grid coordinates in the requested traversal order.
fn tile_coords(
    tiles_x: usize,
    tiles_y: usize,
    order: ScanOrder,
) -> impl Iterator<Item = (usize, usize)> {
    let coords: Vec<(usize, usize)> = match order {
        ScanOrder::RowMajor => (0..tiles_y)
            .flat_map(|ty| (0..tiles_x).map(move |tx| (tx, ty)))
            .collect(),
        ScanOrder::ColumnMajor => (0..tiles_x)
            .flat_map(|tx| (0..tiles_y).map(move |ty| (tx, ty)))
            .collect(),
    };
    coords.into_iter()
}

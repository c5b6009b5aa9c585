//! The decode -> encode -> write pipeline behind the CLI.

use std::fs;
use std::path::Path;

use chr_tile::{ChrEncoder, ChrOutput, PlaneOrder, ScanOrder, TILE_SIZE};

use crate::decode::{load_png, DecodedImage};
use crate::error::ConvertError;

/// Conversion settings, mirroring the encoder's builder options.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Tile edge length in pixels (the CHR format is 8).
    pub tile_size: usize,
    /// Tile traversal order across the image.
    pub scan_order: ScanOrder,
    /// Which bitplane leads within each tile.
    pub plane_order: PlaneOrder,
    /// Pad the tile count up to a multiple of this (1 = no padding).
    pub width_multiple: usize,
    /// Hard output size limit in bytes (0 = soft bank warning only).
    pub byte_limit: usize,
    /// Zero-fill to a full 4096-byte bank (legacy behavior).
    pub pad_to_bank: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            scan_order: ScanOrder::default(),
            plane_order: PlaneOrder::default(),
            width_multiple: 1,
            byte_limit: 0,
            pad_to_bank: false,
        }
    }
}

impl ConvertOptions {
    fn encoder(&self) -> ChrEncoder {
        ChrEncoder::new()
            .tile_size(self.tile_size)
            .scan_order(self.scan_order)
            .plane_order(self.plane_order)
            .width_multiple(self.width_multiple)
            .byte_limit(self.byte_limit)
            .pad_to_bank(self.pad_to_bank)
    }
}

/// Encode an already-decoded image into a CHR stream.
pub fn convert_image(
    image: &DecodedImage,
    options: &ConvertOptions,
) -> Result<ChrOutput, ConvertError> {
    let output = options
        .encoder()
        .encode(&image.pixels, image.width, image.height)?;
    Ok(output)
}

/// Convert a PNG file into a `.chr` file.
///
/// Non-fatal conditions (ignored margins, exceeded soft limit,
/// truncation) are forwarded to `tracing::warn!`; structural errors
/// abort before anything is written. On truncation the partial buffer
/// is still written out, matching the original tooling: the bytes that
/// were produced are valid tiles.
pub fn convert_file(
    source: &Path,
    dest: &Path,
    options: &ConvertOptions,
) -> Result<ChrOutput, ConvertError> {
    let image = load_png(source)?;
    tracing::debug!(
        width = image.width,
        height = image.height,
        transparency = image.has_transparency,
        "decoded source image"
    );

    let output = convert_image(&image, options)?;
    for warning in output.warnings() {
        tracing::warn!(source = %source.display(), "{warning}");
    }

    fs::write(dest, output.bytes())?;
    Ok(output)
}

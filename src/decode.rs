//! PNG decoding into the flat RGBA grid the encoder consumes.
//!
//! The core crate is deliberately I/O-free; this module is the
//! image-decoding collaborator in front of it. Everything the `png`
//! crate can normalize to 8 bits per channel is accepted: grayscale,
//! grayscale+alpha, indexed (with or without transparency), RGB and
//! RGBA, at any bit depth.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chr_tile::Rgba;

use crate::error::ConvertError;

/// A decoded image ready for CHR encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Row-major RGBA pixels, `width * height` entries.
    pub pixels: Vec<Rgba>,
    /// True when the source carried any non-opaque pixel.
    pub has_transparency: bool,
}

/// Decode a PNG from any reader.
///
/// Paletted and sub-8-bit images are expanded, 16-bit channels are
/// stripped to 8, and palette transparency (tRNS) becomes an alpha
/// channel, so the output is always plain 8-bit RGBA.
pub fn decode_png<R: Read>(reader: R) -> Result<DecodedImage, ConvertError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    let width = info.width as usize;
    let height = info.height as usize;
    let mut pixels = Vec::with_capacity(width * height);

    match info.color_type {
        png::ColorType::Grayscale => {
            for &v in data {
                pixels.push(Rgba::from_rgb(v, v, v));
            }
        }
        png::ColorType::GrayscaleAlpha => {
            for chunk in data.chunks_exact(2) {
                pixels.push(Rgba::from_rgba(chunk[0], chunk[0], chunk[0], chunk[1]));
            }
        }
        png::ColorType::Rgb => {
            for chunk in data.chunks_exact(3) {
                pixels.push(Rgba::from_rgb(chunk[0], chunk[1], chunk[2]));
            }
        }
        png::ColorType::Rgba => {
            for chunk in data.chunks_exact(4) {
                pixels.push(Rgba::from_rgba(chunk[0], chunk[1], chunk[2], chunk[3]));
            }
        }
        // normalize_to_color8 expands indexed data, so reaching this
        // arm means the decoder contract changed underneath us.
        other => {
            return Err(ConvertError::UnsupportedLayout(format!(
                "{other:?} after normalization"
            )))
        }
    }

    let has_transparency = pixels.iter().any(|px| px.a < 255);

    Ok(DecodedImage {
        width,
        height,
        pixels,
        has_transparency,
    })
}

/// Decode a PNG file from disk.
pub fn load_png(path: &Path) -> Result<DecodedImage, ConvertError> {
    let file = File::open(path)?;
    decode_png(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: encode raw pixel data into an in-memory PNG.
    fn encode_png(width: u32, height: u32, color_type: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_decode_rgb() {
        let data = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
        let bytes = encode_png(2, 2, png::ColorType::Rgb, &data);
        let image = decode_png(&bytes[..]).unwrap();

        assert_eq!(image.width, 2);
        assert_eq!(image.height, 2);
        assert_eq!(
            image.pixels,
            vec![
                Rgba::from_rgb(255, 0, 0),
                Rgba::from_rgb(0, 255, 0),
                Rgba::from_rgb(0, 0, 255),
                Rgba::from_rgb(9, 9, 9),
            ]
        );
        assert!(!image.has_transparency);
    }

    #[test]
    fn test_decode_rgba_transparency_flag() {
        let data = [0u8, 0, 0, 255, 10, 20, 30, 0];
        let bytes = encode_png(2, 1, png::ColorType::Rgba, &data);
        let image = decode_png(&bytes[..]).unwrap();

        assert!(image.has_transparency);
        assert_eq!(image.pixels[1], Rgba::from_rgba(10, 20, 30, 0));
    }

    #[test]
    fn test_decode_grayscale_expands_channels() {
        let data = [0u8, 128, 255];
        let bytes = encode_png(3, 1, png::ColorType::Grayscale, &data);
        let image = decode_png(&bytes[..]).unwrap();

        assert_eq!(
            image.pixels,
            vec![
                Rgba::from_rgb(0, 0, 0),
                Rgba::from_rgb(128, 128, 128),
                Rgba::from_rgb(255, 255, 255),
            ]
        );
    }

    #[test]
    fn test_decode_indexed_expands_to_rgb() {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 2, 1);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![0, 0, 0, 200, 100, 50]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 1]).unwrap();
        }
        let image = decode_png(&out[..]).unwrap();

        assert_eq!(
            image.pixels,
            vec![Rgba::from_rgb(0, 0, 0), Rgba::from_rgb(200, 100, 50)]
        );
        assert!(!image.has_transparency);
    }

    #[test]
    fn test_decode_truncated_stream_fails() {
        let data = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
        let bytes = encode_png(2, 2, png::ColorType::Rgb, &data);
        let result = decode_png(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }
}

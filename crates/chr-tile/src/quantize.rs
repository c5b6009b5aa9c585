//! The pixel quantizer seam.
//!
//! Color *reduction* is outside this crate: the encoder only requires
//! that each tile region arrive as at most four discrete color
//! buckets. [`TileQuantizer`] is that boundary; any implementation
//! (a library binding, median-cut, a hand-rolled octree) satisfies the
//! stream assembler as long as it returns a palette plus one index per
//! pixel.
//!
//! [`ExactQuantizer`] is the shipped implementation: it performs no
//! reduction at all, collecting the distinct colors already present in
//! the region and failing when there are more than four. This is the
//! right default for pixel art authored against the CHR constraints.

use crate::color::Rgba;
use crate::palette::{PaletteError, TilePalette, MAX_COLORS};

/// Alpha values strictly below this count as transparent.
///
/// Raw RGBA input has no single "has transparency" bit, so the
/// midpoint splits antialiased edges the same way a 1-bit alpha mask
/// would.
pub const OPAQUE_ALPHA_THRESHOLD: u8 = 128;

/// The output of quantizing one tile region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedTile {
    /// The (unordered, un-normalized) colors the region uses.
    pub palette: TilePalette,
    /// One palette index per pixel, row-major, same length as the
    /// input region.
    pub indices: Vec<u8>,
}

/// Reduces a tile region to at most four discrete color buckets.
///
/// Implementations must be pure per region: the same pixels always
/// produce the same palette and indices. The palette they return is in
/// *discovery* order; brightness normalization happens later in the
/// pipeline.
pub trait TileQuantizer {
    /// Quantize a `size * size` pixel region.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Overflow`] when the region cannot be expressed
    /// in [`MAX_COLORS`] buckets. The 2bpp format cannot represent
    /// such a tile; silently approximating it here would corrupt the
    /// caller's art, so this is a hard failure.
    fn quantize(&self, pixels: &[Rgba]) -> Result<QuantizedTile, PaletteError>;
}

/// Quantizer that only accepts regions already within the color budget.
///
/// Walks the region once, assigning each new distinct color the next
/// palette slot. Every pixel with alpha below
/// [`OPAQUE_ALPHA_THRESHOLD`] collapses into a single transparent
/// entry regardless of its RGB bytes.
///
/// # Example
///
/// ```
/// use chr_tile::{ExactQuantizer, Rgba, TileQuantizer};
///
/// let pixels = vec![
///     Rgba::from_rgb(0, 0, 0),
///     Rgba::from_rgb(255, 255, 255),
///     Rgba::from_rgb(0, 0, 0),
///     Rgba::from_rgb(0, 0, 0),
/// ];
/// let quantized = ExactQuantizer::default().quantize(&pixels).unwrap();
///
/// assert_eq!(quantized.palette.len(), 2);
/// assert_eq!(quantized.indices, vec![0, 1, 0, 0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactQuantizer;

impl TileQuantizer for ExactQuantizer {
    fn quantize(&self, pixels: &[Rgba]) -> Result<QuantizedTile, PaletteError> {
        let mut colors: Vec<Rgba> = Vec::with_capacity(MAX_COLORS);
        let mut transparent: Option<usize> = None;
        let mut indices = Vec::with_capacity(pixels.len());

        for (pos, &px) in pixels.iter().enumerate() {
            let slot = if px.a < OPAQUE_ALPHA_THRESHOLD {
                match transparent {
                    Some(slot) => slot,
                    None => {
                        let slot = colors.len();
                        colors.push(Rgba::from_rgba(px.r, px.g, px.b, 0));
                        transparent = Some(slot);
                        slot
                    }
                }
            } else {
                // Opaque colors compare on RGB only; alpha noise above
                // the threshold does not split palette entries.
                match colors
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| transparent != Some(i))
                    .find(|&(_, c)| (c.r, c.g, c.b) == (px.r, px.g, px.b))
                {
                    Some((slot, _)) => slot,
                    None => {
                        let slot = colors.len();
                        colors.push(Rgba::from_rgb(px.r, px.g, px.b));
                        slot
                    }
                }
            };
            if slot >= MAX_COLORS {
                // Finish counting the remaining distinct colors so the
                // error reports the region's true total.
                count_remaining(&mut colors, &mut transparent, &pixels[pos + 1..]);
                return Err(PaletteError::Overflow {
                    count: colors.len(),
                });
            }
            indices.push(slot as u8);
        }

        let palette = TilePalette::new(colors, transparent)?;
        Ok(QuantizedTile { palette, indices })
    }
}

/// Extend `colors` with every distinct color in `pixels` that is not
/// already present, using the same matching rules as the main scan.
/// Only runs on the overflow path, where the exact total matters more
/// than the (already doomed) index assignment.
fn count_remaining(colors: &mut Vec<Rgba>, transparent: &mut Option<usize>, pixels: &[Rgba]) {
    for &px in pixels {
        if px.a < OPAQUE_ALPHA_THRESHOLD {
            if transparent.is_none() {
                *transparent = Some(colors.len());
                colors.push(Rgba::from_rgba(px.r, px.g, px.b, 0));
            }
        } else if !colors
            .iter()
            .enumerate()
            .any(|(i, c)| *transparent != Some(i) && (c.r, c.g, c.b) == (px.r, px.g, px.b))
        {
            colors.push(Rgba::from_rgb(px.r, px.g, px.b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_discovery_order_indexing() {
        let pixels = vec![
            Rgba::from_rgb(9, 9, 9),
            Rgba::from_rgb(1, 1, 1),
            Rgba::from_rgb(9, 9, 9),
            Rgba::from_rgb(5, 5, 5),
        ];
        let q = ExactQuantizer.quantize(&pixels).unwrap();
        assert_eq!(q.indices, vec![0, 1, 0, 2]);
        assert_eq!(
            q.palette.colors(),
            &[
                Rgba::from_rgb(9, 9, 9),
                Rgba::from_rgb(1, 1, 1),
                Rgba::from_rgb(5, 5, 5),
            ]
        );
        assert_eq!(q.palette.transparent(), None);
    }

    #[test]
    fn test_four_colors_accepted_five_rejected() {
        let four: Vec<Rgba> = (0..4u8).map(|v| Rgba::from_rgb(v, v, v)).collect();
        assert!(ExactQuantizer.quantize(&four).is_ok());

        let five: Vec<Rgba> = (0..5u8).map(|v| Rgba::from_rgb(v, v, v)).collect();
        assert_eq!(
            ExactQuantizer.quantize(&five),
            Err(PaletteError::Overflow { count: 5 })
        );
    }

    #[test]
    fn test_overflow_reports_full_distinct_count() {
        // Seven distinct shades plus a transparent pixel: the error
        // must report all eight, not just the first overflow.
        let mut pixels: Vec<Rgba> = (0..7u8).map(|v| Rgba::from_rgb(v * 30, 0, 0)).collect();
        pixels.push(Rgba::from_rgba(0, 0, 0, 0));
        pixels.push(Rgba::from_rgb(30, 0, 0)); // duplicate, not counted
        assert_eq!(
            ExactQuantizer.quantize(&pixels),
            Err(PaletteError::Overflow { count: 8 })
        );
    }

    #[test]
    fn test_transparent_pixels_collapse() {
        // Three different RGB values, all below the alpha threshold:
        // one palette entry.
        let pixels = vec![
            Rgba::from_rgba(255, 0, 0, 0),
            Rgba::from_rgba(0, 255, 0, 10),
            Rgba::from_rgba(0, 0, 255, 127),
            Rgba::from_rgb(40, 40, 40),
        ];
        let q = ExactQuantizer.quantize(&pixels).unwrap();
        assert_eq!(q.palette.len(), 2);
        assert_eq!(q.palette.transparent(), Some(0));
        assert_eq!(q.indices, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_opaque_matching_ignores_alpha_noise() {
        let pixels = vec![
            Rgba::from_rgba(40, 40, 40, 255),
            Rgba::from_rgba(40, 40, 40, 200),
        ];
        let q = ExactQuantizer.quantize(&pixels).unwrap();
        assert_eq!(q.palette.len(), 1);
        assert_eq!(q.indices, vec![0, 0]);
    }

    #[test]
    fn test_transparent_entry_never_matches_opaque() {
        // A transparent pixel and an opaque pixel with the same RGB
        // must occupy different slots.
        let pixels = vec![
            Rgba::from_rgba(50, 60, 70, 0),
            Rgba::from_rgb(50, 60, 70),
        ];
        let q = ExactQuantizer.quantize(&pixels).unwrap();
        assert_eq!(q.palette.len(), 2);
        assert_eq!(q.indices, vec![0, 1]);
    }

    #[test]
    fn test_pure_per_region() {
        let pixels: Vec<Rgba> = (0..64)
            .map(|i| Rgba::from_rgb((i % 4) as u8 * 80, 0, 0))
            .collect();
        let a = ExactQuantizer.quantize(&pixels).unwrap();
        let b = ExactQuantizer.quantize(&pixels).unwrap();
        assert_eq!(a, b);
    }
}

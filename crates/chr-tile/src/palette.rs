//! Tile palettes and brightness normalization.
//!
//! A CHR tile can address at most four colors. [`TilePalette`] holds
//! the (unordered) colors a tile actually uses, plus an optional
//! transparent slot, and [`normalize()`](TilePalette::normalize)
//! produces the canonical ordering the encoder writes: brightness
//! ascending, with the transparent entry pinned to canonical index 0.
//! Index 0 is what the console hardware treats as "show background",
//! so the darkest (or transparent) color always lands there.

use thiserror::Error;

use crate::color::Rgba;

/// Maximum number of colors a 2-bit-per-pixel tile can address.
pub const MAX_COLORS: usize = 4;

/// Error type for palette validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// More distinct colors than the 2bpp format can represent.
    #[error("tile uses {count} colors, the 2bpp format allows at most {MAX_COLORS}")]
    Overflow {
        /// Number of distinct colors found.
        count: usize,
    },

    /// The designated transparent index does not name a palette entry.
    #[error("transparent index {index} is out of range for a {len}-color palette")]
    TransparentOutOfRange {
        /// The offending index.
        index: usize,
        /// Palette length at the time of the error.
        len: usize,
    },
}

/// The unordered color set of a single tile.
///
/// Holds up to [`MAX_COLORS`] colors in the order the quantizer
/// discovered them, plus an optional transparent slot. Normalization
/// is a separate, pure step so the original discovery order stays
/// available for diagnostics and deterministic tie-breaking.
///
/// # Example
///
/// ```
/// use chr_tile::{Rgba, TilePalette};
///
/// let palette = TilePalette::new(
///     vec![
///         Rgba::from_rgb(255, 255, 255), // white, discovered first
///         Rgba::from_rgb(0, 0, 0),       // black
///     ],
///     None,
/// )
/// .unwrap();
///
/// // Black is darker, so it becomes canonical index 0.
/// assert_eq!(palette.normalize(), vec![1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePalette {
    colors: Vec<Rgba>,
    transparent: Option<usize>,
}

impl TilePalette {
    /// Create a palette from the colors a tile uses.
    ///
    /// # Arguments
    ///
    /// * `colors` - At most [`MAX_COLORS`] entries, in discovery order.
    /// * `transparent` - Index of the entry that represents transparent
    ///   pixels, if the tile has any.
    ///
    /// # Errors
    ///
    /// * [`PaletteError::Overflow`] when more than [`MAX_COLORS`]
    ///   colors are supplied.
    /// * [`PaletteError::TransparentOutOfRange`] when `transparent`
    ///   does not name an entry.
    pub fn new(colors: Vec<Rgba>, transparent: Option<usize>) -> Result<Self, PaletteError> {
        if colors.len() > MAX_COLORS {
            return Err(PaletteError::Overflow {
                count: colors.len(),
            });
        }
        if let Some(index) = transparent {
            if index >= colors.len() {
                return Err(PaletteError::TransparentOutOfRange {
                    index,
                    len: colors.len(),
                });
            }
        }
        Ok(Self {
            colors,
            transparent,
        })
    }

    /// Number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette holds no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors in discovery order.
    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Index of the transparent entry, if one was designated.
    #[inline]
    pub fn transparent(&self) -> Option<usize> {
        self.transparent
    }

    /// Compute the canonical ordering permutation.
    ///
    /// Returns `perm` such that `perm[canonical_index] = original_index`.
    /// Entries sort ascending by [`Rgba::luma()`]; the sort is stable,
    /// so equal-brightness colors keep their discovery order. A
    /// designated transparent entry skips the sort entirely and is
    /// pinned to canonical index 0 regardless of its brightness.
    ///
    /// Pure function: repeated calls on the same palette return the
    /// same permutation.
    pub fn normalize(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.colors.len())
            .filter(|&i| self.transparent != Some(i))
            .collect();
        // Stable sort keeps ties deterministic in discovery order.
        order.sort_by(|&a, &b| self.colors[a].luma().total_cmp(&self.colors[b].luma()));

        match self.transparent {
            Some(t) => {
                let mut perm = Vec::with_capacity(self.colors.len());
                perm.push(t);
                perm.extend(order);
                perm
            }
            None => order,
        }
    }

    /// Compute the inverse of [`normalize()`](Self::normalize):
    /// `map[original_index] = canonical_index`.
    ///
    /// This is the lookup the stream assembler applies to quantizer
    /// output, which is expressed in original palette indices.
    pub fn canonical_map(&self) -> Vec<u8> {
        let perm = self.normalize();
        let mut map = vec![0u8; self.colors.len()];
        for (canonical, &original) in perm.iter().enumerate() {
            map[original] = canonical as u8;
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_rejects_overflow() {
        let colors = vec![
            Rgba::from_rgb(0, 0, 0),
            Rgba::from_rgb(1, 1, 1),
            Rgba::from_rgb(2, 2, 2),
            Rgba::from_rgb(3, 3, 3),
            Rgba::from_rgb(4, 4, 4),
        ];
        let result = TilePalette::new(colors, None);
        assert_eq!(result, Err(PaletteError::Overflow { count: 5 }));
    }

    #[test]
    fn test_new_rejects_bad_transparent_index() {
        let colors = vec![Rgba::from_rgb(0, 0, 0), Rgba::from_rgb(255, 255, 255)];
        let result = TilePalette::new(colors, Some(2));
        assert_eq!(
            result,
            Err(PaletteError::TransparentOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_normalize_sorts_by_brightness() {
        // Discovery order: white, mid gray, black.
        let palette = TilePalette::new(
            vec![
                Rgba::from_rgb(255, 255, 255),
                Rgba::from_rgb(128, 128, 128),
                Rgba::from_rgb(0, 0, 0),
            ],
            None,
        )
        .unwrap();

        // Canonical order is darkest first: black(2), gray(1), white(0).
        assert_eq!(palette.normalize(), vec![2, 1, 0]);
    }

    #[test]
    fn test_normalize_pins_transparent_to_zero() {
        // The transparent entry is the brightest color; it must still
        // land at canonical index 0.
        let palette = TilePalette::new(
            vec![
                Rgba::from_rgb(40, 40, 40),
                Rgba::from_rgba(255, 255, 255, 0), // transparent
                Rgba::from_rgb(200, 200, 200),
            ],
            Some(1),
        )
        .unwrap();

        assert_eq!(palette.normalize(), vec![1, 0, 2]);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let palette = TilePalette::new(
            vec![
                Rgba::from_rgb(10, 200, 30),
                Rgba::from_rgb(200, 10, 30),
                Rgba::from_rgb(30, 10, 200),
                Rgba::from_rgb(255, 255, 0),
            ],
            Some(2),
        )
        .unwrap();

        let first = palette.normalize();
        for _ in 0..10 {
            assert_eq!(palette.normalize(), first);
        }
    }

    #[test]
    fn test_normalize_ties_keep_discovery_order() {
        // Two identical-brightness colors: stable sort must keep them
        // in discovery order.
        let palette = TilePalette::new(
            vec![
                Rgba::from_rgb(255, 255, 255),
                Rgba::from_rgb(100, 100, 100),
                Rgba::from_rgba(100, 100, 100, 254), // same luma, later discovery
            ],
            None,
        )
        .unwrap();

        assert_eq!(palette.normalize(), vec![1, 2, 0]);
    }

    #[test]
    fn test_canonical_map_inverts_normalize() {
        let palette = TilePalette::new(
            vec![
                Rgba::from_rgb(255, 255, 255),
                Rgba::from_rgb(0, 0, 0),
                Rgba::from_rgb(128, 128, 128),
                Rgba::from_rgba(0, 255, 0, 0),
            ],
            Some(3),
        )
        .unwrap();

        let perm = palette.normalize();
        let map = palette.canonical_map();
        for (canonical, &original) in perm.iter().enumerate() {
            assert_eq!(map[original] as usize, canonical);
        }
        // The permutation must be a bijection on 0..len.
        let mut sorted = perm.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_single_color_palette() {
        let palette = TilePalette::new(vec![Rgba::from_rgb(7, 7, 7)], None).unwrap();
        assert_eq!(palette.normalize(), vec![0]);
        assert_eq!(palette.canonical_map(), vec![0]);
    }

    #[test]
    fn test_empty_palette_normalizes_empty() {
        let palette = TilePalette::new(vec![], None).unwrap();
        assert_eq!(palette.normalize(), Vec::<usize>::new());
    }
}

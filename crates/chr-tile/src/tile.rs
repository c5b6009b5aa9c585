//! Single-tile bitplane packing.
//!
//! A CHR tile stores an 8x8 block of 2-bit color indices as two
//! parallel 8-byte bitplanes. Plane 0 holds bit 0 of every pixel's
//! index, plane 1 holds bit 1; within a row byte the most significant
//! bit is the left-most pixel:
//!
//! ```text
//! index grid row:   3 3 0 0 0 0 1 2
//! bit 0 per pixel:  1 1 0 0 0 0 1 0   -> plane0 byte 0b1100_0010
//! bit 1 per pixel:  1 1 0 0 0 0 0 1   -> plane1 byte 0b1100_0001
//! ```
//!
//! Recombining `(plane1_bit << 1) | plane0_bit` per pixel reproduces
//! the grid exactly; [`Tile::decode`] does so and is the inverse of
//! [`Tile::encode`] for every grid.

use crate::error::EncodeError;

/// Edge length of a CHR tile in pixels.
pub const TILE_SIZE: usize = 8;

/// Encoded size of one full 8x8 tile: two 8-byte bitplanes.
pub const BYTES_PER_TILE: usize = 2 * TILE_SIZE;

/// Which bitplane is emitted first within a tile's 16 bytes.
///
/// The canonical CHR layout writes the low plane first. One historical
/// tool variant wrote the high plane first; both are supported so
/// either stream can be produced (or decoded) explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneOrder {
    /// Plane 0 (bit 0 of each index) first, then plane 1. Canonical.
    #[default]
    LowThenHigh,
    /// Plane 1 first, then plane 0. Legacy variant.
    HighThenLow,
}

/// A square grid of canonical 2-bit color indices.
///
/// Rows are stored top to bottom, pixels left to right. The edge
/// length is fixed at [`TILE_SIZE`] for the CHR format proper; smaller
/// sizes (1..=8) are accepted for generality, with each row still
/// packed left-aligned into one byte per plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    size: usize,
    pixels: Vec<u8>,
}

impl Tile {
    /// Build a tile from a row-major index buffer.
    ///
    /// # Errors
    ///
    /// * [`EncodeError::TileSize`] when `size` is not in `1..=8`.
    /// * [`EncodeError::Shape`] when `indices.len() != size * size`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts every index is at most 3. Values above 3 cannot
    /// come out of a valid [`TilePalette`](crate::palette::TilePalette),
    /// so the release path does not re-check them.
    pub fn from_indices(indices: &[u8], size: usize) -> Result<Self, EncodeError> {
        if size == 0 || size > TILE_SIZE {
            return Err(EncodeError::TileSize { size });
        }
        let expected = size * size;
        if indices.len() != expected {
            return Err(EncodeError::Shape {
                actual: indices.len(),
                expected,
                size,
            });
        }
        debug_assert!(
            indices.iter().all(|&px| px <= 3),
            "canonical indices must fit in 2 bits"
        );
        Ok(Self {
            size,
            pixels: indices.to_vec(),
        })
    }

    /// Tile edge length in pixels.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The canonical indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.pixels
    }

    /// Encoded byte length of this tile (`2 * size`).
    #[inline]
    pub fn encoded_len(&self) -> usize {
        2 * self.size
    }

    /// Pack the grid into its two bitplanes.
    ///
    /// Returns `2 * size` bytes: one byte per row per plane, planes
    /// ordered per `order`. Each row byte is built by shifting pixels
    /// in left to right, so the first pixel of the row ends up in the
    /// most significant bit. Pure function of the grid.
    pub fn encode(&self, order: PlaneOrder) -> Vec<u8> {
        let mut plane0 = Vec::with_capacity(self.size);
        let mut plane1 = Vec::with_capacity(self.size);

        for row in self.pixels.chunks_exact(self.size) {
            let mut low = 0u8;
            let mut high = 0u8;
            for &px in row {
                low = low << 1 | (px & 0b01);
                high = high << 1 | (px >> 1 & 0b01);
            }
            // Rows narrower than 8 pixels stay left-aligned at the MSB.
            low <<= 8 - self.size;
            high <<= 8 - self.size;
            plane0.push(low);
            plane1.push(high);
        }

        let mut out = Vec::with_capacity(self.encoded_len());
        match order {
            PlaneOrder::LowThenHigh => {
                out.extend_from_slice(&plane0);
                out.extend_from_slice(&plane1);
            }
            PlaneOrder::HighThenLow => {
                out.extend_from_slice(&plane1);
                out.extend_from_slice(&plane0);
            }
        }
        out
    }

    /// Unpack two bitplanes back into an index grid.
    ///
    /// Inverse of [`encode`](Self::encode) for the same `size` and
    /// `order`. Fails with [`EncodeError::Shape`] when `planes` is not
    /// exactly `2 * size` bytes.
    pub fn decode(planes: &[u8], size: usize, order: PlaneOrder) -> Result<Self, EncodeError> {
        if size == 0 || size > TILE_SIZE {
            return Err(EncodeError::TileSize { size });
        }
        if planes.len() != 2 * size {
            return Err(EncodeError::Shape {
                actual: planes.len(),
                expected: 2 * size,
                size,
            });
        }
        let (plane0, plane1) = match order {
            PlaneOrder::LowThenHigh => (&planes[..size], &planes[size..]),
            PlaneOrder::HighThenLow => (&planes[size..], &planes[..size]),
        };

        let mut pixels = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let shift = 7 - col;
                let low = plane0[row] >> shift & 1;
                let high = plane1[row] >> shift & 1;
                pixels.push(high << 1 | low);
            }
        }
        Ok(Self { size, pixels })
    }
}

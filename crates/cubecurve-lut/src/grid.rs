//! Regular 3D LUT grid.
//!
//! A [`LutGrid`] is the raw table read from a `.cube` file: `size^3` RGB
//! output triplets in file order. No interpolation is done on it; the only
//! consumer is the diagonal extractor.

use crate::{LutError, LutResult};

/// Smallest grid accepted per axis.
pub const MIN_GRID_SIZE: usize = 2;

/// A parsed 3D LUT.
///
/// # Structure
///
/// - `size` samples per axis
/// - `size^3` entries, R varies fastest, then G, then B
///
/// Flat index of grid position `(r, g, b)` is `r + g*size + b*size²`.
///
/// # Example
///
/// ```rust
/// use cubecurve_lut::LutGrid;
///
/// let grid = LutGrid::identity(17).unwrap();
/// assert_eq!(grid.entries().len(), 17 * 17 * 17);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LutGrid {
    size: usize,
    entries: Vec<[f32; 3]>,
}

impl LutGrid {
    /// Creates a grid from entries in file order.
    ///
    /// Fails with [`LutError::InvalidSize`] for sizes below 2 and with
    /// [`LutError::SizeMismatch`] unless there are exactly `size^3` entries.
    /// A size whose cube overflows `usize` reports `expected` as `usize::MAX`.
    pub fn from_entries(size: usize, entries: Vec<[f32; 3]>) -> LutResult<Self> {
        check_size(size)?;
        // No entry table can reach usize::MAX rows, so this always mismatches.
        let expected = size.saturating_pow(3);
        if entries.len() != expected {
            return Err(LutError::SizeMismatch {
                size,
                expected,
                found: entries.len(),
            });
        }
        Ok(Self { size, entries })
    }

    /// Creates an identity (pass-through) grid.
    ///
    /// Same size limits as [`LutGrid::from_entries`].
    pub fn identity(size: usize) -> LutResult<Self> {
        check_size(size)?;
        let count = size
            .checked_pow(3)
            .ok_or_else(|| LutError::InvalidSize(format!("grid size {} is too large", size)))?;
        let scale = (size - 1) as f32;
        let mut entries = Vec::with_capacity(count);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    entries.push([r as f32 / scale, g as f32 / scale, b as f32 / scale]);
                }
            }
        }
        Self::from_entries(size, entries)
    }

    /// Samples per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All entries in file order.
    #[inline]
    pub fn entries(&self) -> &[[f32; 3]] {
        &self.entries
    }

    /// Flat index of grid position `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + g * self.size + b * self.size * self.size
    }

    /// Entry at grid position `(r, g, b)`, or `None` outside the table.
    pub fn get(&self, r: usize, g: usize, b: usize) -> Option<[f32; 3]> {
        self.entries.get(self.index(r, g, b)).copied()
    }

    /// Consumes the grid, returning `(size, entries)`.
    pub fn into_parts(self) -> (usize, Vec<[f32; 3]>) {
        (self.size, self.entries)
    }

    /// Builds a grid without checking the entry count.
    #[cfg(test)]
    pub(crate) fn new_unchecked(size: usize, entries: Vec<[f32; 3]>) -> Self {
        Self { size, entries }
    }
}

fn check_size(size: usize) -> LutResult<()> {
    if size < MIN_GRID_SIZE {
        return Err(LutError::InvalidSize(format!(
            "grid size must be at least {}, got {}",
            MIN_GRID_SIZE, size
        )));
    }
    Ok(())
}

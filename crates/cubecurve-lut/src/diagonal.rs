//! Neutral-diagonal sampling.
//!
//! The diagonal of a 3D LUT (grid points with r = g = b) is its response to
//! achromatic input. Reading it per channel gives three independent 1D
//! transfer functions, which is the approximation the curve builder works on.

use crate::{LutError, LutGrid, LutResult};
use tracing::trace;

/// One RGB sample per grid level along the neutral axis, darkest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalSamples {
    samples: Vec<[f32; 3]>,
}

impl DiagonalSamples {
    /// Wraps already-extracted samples.
    pub fn from_samples(samples: Vec<[f32; 3]>) -> Self {
        Self { samples }
    }

    /// Number of samples (equals the grid size).
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples, darkest first.
    #[inline]
    pub fn samples(&self) -> &[[f32; 3]] {
        &self.samples
    }

    /// Values of one channel (0 = R, 1 = G, 2 = B).
    ///
    /// # Panics
    ///
    /// Panics if `channel > 2`.
    pub fn channel(&self, channel: usize) -> Vec<f32> {
        assert!(channel < 3, "channel index {} out of range", channel);
        self.samples.iter().map(|rgb| rgb[channel]).collect()
    }

    /// Splits into per-channel sequences `[r, g, b]`.
    pub fn channels(&self) -> [Vec<f32>; 3] {
        [self.channel(0), self.channel(1), self.channel(2)]
    }
}

/// Flat index of diagonal level `n` in a grid of `size` per axis.
#[inline]
pub fn diagonal_index(n: usize, size: usize) -> usize {
    n + n * size + n * size * size
}

/// Extracts the neutral diagonal of `grid`.
///
/// Returns [`LutError::IndexOutOfRange`] rather than reading past the entry
/// table; a grid built through [`LutGrid::from_entries`] never triggers it.
///
/// # Example
///
/// ```rust
/// use cubecurve_lut::{extract_diagonal, LutGrid};
///
/// let diag = extract_diagonal(&LutGrid::identity(2).unwrap()).unwrap();
/// assert_eq!(diag.samples(), &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
/// ```
pub fn extract_diagonal(grid: &LutGrid) -> LutResult<DiagonalSamples> {
    let size = grid.size();
    let entries = grid.entries();
    trace!(size, entries = entries.len(), "extract_diagonal");

    let samples = (0..size)
        .map(|n| {
            let index = diagonal_index(n, size);
            entries
                .get(index)
                .copied()
                .ok_or(LutError::IndexOutOfRange {
                    index,
                    len: entries.len(),
                })
        })
        .collect::<LutResult<Vec<_>>>()?;

    Ok(DiagonalSamples { samples })
}

//! Piecewise-linear curve resampling.
//!
//! Reduces a densely sampled channel to a bounded number of values by
//! evaluating its linear interpolant on an evenly spaced target grid. Never
//! upsamples: inputs that already fit are returned as-is.

use crate::{CurveError, CurveResult};
use tracing::trace;

/// Default upper bound on control points per channel.
pub const DEFAULT_MAX_POINTS: usize = 256;

/// `n` positions evenly spaced over [0, 1], endpoints included.
///
/// A single position is placed at 0.
pub fn unit_positions(n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f32;
            (0..n).map(|i| i as f32 / last).collect()
        }
    }
}

/// Linear interpolation of the samples `(xp, fp)` at `t`.
///
/// `xp` must be increasing. Positions at or before `xp[0]` return `fp[0]`,
/// at or after the last position return the last value.
///
/// # Panics
///
/// Panics if `xp` is empty or the slices differ in length.
pub fn interp(t: f32, xp: &[f32], fp: &[f32]) -> f32 {
    assert_eq!(xp.len(), fp.len(), "position/value length mismatch");
    let last = xp.len() - 1;

    if t <= xp[0] {
        return fp[0];
    }
    if t >= xp[last] {
        return fp[last];
    }

    // First source position strictly greater than t; k is the one before it.
    let k = xp.partition_point(|&p| p <= t) - 1;
    let (p0, p1) = (xp[k], xp[k + 1]);
    let (v0, v1) = (fp[k], fp[k + 1]);
    let span = p1 - p0;
    if span <= 0.0 {
        return v0;
    }
    v0 + (v1 - v0) * (t - p0) / span
}

/// Resamples one channel to at most `max_points` values.
///
/// Returns a copy of `values` when it already fits; otherwise evaluates the
/// linear interpolant at `max_points` evenly spaced positions, keeping the
/// first and last values exact.
///
/// # Example
///
/// ```rust
/// use cubecurve_curve::resample;
///
/// let out = resample(&[0.0, 0.25, 0.5, 0.75, 1.0], 3).unwrap();
/// assert_eq!(out, vec![0.0, 0.5, 1.0]);
/// ```
pub fn resample(values: &[f32], max_points: usize) -> CurveResult<Vec<f32>> {
    if max_points == 0 {
        return Err(CurveError::InvalidMaxPoints(max_points));
    }
    if values.len() <= max_points {
        return Ok(values.to_vec());
    }

    trace!(from = values.len(), to = max_points, "resample");
    let source = unit_positions(values.len());
    let target = unit_positions(max_points);
    Ok(target.iter().map(|&t| interp(t, &source, values)).collect())
}

/// Resamples three channels onto the same target grid.
pub fn resample_channels(
    channels: &[Vec<f32>; 3],
    max_points: usize,
) -> CurveResult<[Vec<f32>; 3]> {
    Ok([
        resample(&channels[0], max_points)?,
        resample(&channels[1], max_points)?,
        resample(&channels[2], max_points)?,
    ])
}

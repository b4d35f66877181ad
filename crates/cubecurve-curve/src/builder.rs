//! Pairs resampled channel values with normalized positions.

use crate::resample::unit_positions;
use crate::{ControlPoint, CurveError, CurveResult, CurveSet, ReducedCurve};

/// Builds a [`CurveSet`] from three equally long channel sequences.
///
/// Point `j` of every curve sits at `x = j / (P - 1)` (0 for a single
/// point), so the three curves share their `x` positions.
///
/// # Example
///
/// ```rust
/// use cubecurve_curve::{build_curve_set, ControlPoint};
///
/// let set = build_curve_set(&[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0]).unwrap();
/// assert_eq!(set.red().points()[1], ControlPoint::new(1.0, 1.0));
/// ```
pub fn build_curve_set(red: &[f32], green: &[f32], blue: &[f32]) -> CurveResult<CurveSet> {
    if red.len() != green.len() || red.len() != blue.len() {
        return Err(CurveError::ChannelLengthMismatch {
            red: red.len(),
            green: green.len(),
            blue: blue.len(),
        });
    }

    let xs = unit_positions(red.len());
    let curve = |values: &[f32]| {
        ReducedCurve::new(
            xs.iter()
                .zip(values)
                .map(|(&x, &y)| ControlPoint::new(x, y))
                .collect(),
        )
    };

    Ok(CurveSet::from_curves(curve(red), curve(green), curve(blue)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_shared() {
        let set = build_curve_set(&[0.1, 0.2, 0.3], &[0.0, 0.5, 1.0], &[1.0, 0.5, 0.0]).unwrap();
        assert_eq!(set.len(), 3);
        let xs: Vec<f32> = set.red().xs().collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0]);
        assert!(set.green().xs().eq(xs.iter().copied()));
        assert!(set.blue().xs().eq(xs.iter().copied()));
        assert_eq!(set.blue().ys().collect::<Vec<_>>(), vec![1.0, 0.5, 0.0]);
        for (_, curve) in set.iter() {
            assert!(curve.validate().is_ok());
        }
    }

    #[test]
    fn single_point_at_origin() {
        let set = build_curve_set(&[0.4], &[0.5], &[0.6]).unwrap();
        assert_eq!(set.red().points(), &[ControlPoint::new(0.0, 0.4)]);
        assert_eq!(set.blue().points(), &[ControlPoint::new(0.0, 0.6)]);
    }

    #[test]
    fn mismatched_channels() {
        let err = build_curve_set(&[0.0, 1.0], &[0.0, 1.0], &[0.0]).unwrap_err();
        assert!(matches!(
            err,
            CurveError::ChannelLengthMismatch { red: 2, green: 2, blue: 1 }
        ));
    }
}

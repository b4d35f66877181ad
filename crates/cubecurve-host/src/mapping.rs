//! Mutable curve mappings, the host-side representation of tone curves.
//!
//! Hosts keep curves as resizable arrays of point locations rather than as
//! immutable lists. [`MappedCurve::reconcile`] brings such an array to the
//! exact shape of a converted curve: grow or shrink one point at a time,
//! then overwrite every location.

use crate::{HostError, HostResult};
use cubecurve_curve::ControlPoint;
use serde::Serialize;

/// Curve indices in an RGB curves mapping.
pub mod rgb {
    /// Red curve.
    pub const RED: usize = 0;
    /// Green curve.
    pub const GREEN: usize = 1;
    /// Blue curve.
    pub const BLUE: usize = 2;
    /// Combined curve applied after the per-channel ones.
    pub const COMBINED: usize = 3;
}

/// Curve indices in a hue-correct mapping.
pub mod hsv {
    /// Hue shift by hue.
    pub const HUE: usize = 0;
    /// Saturation by hue.
    pub const SATURATION: usize = 1;
    /// Value by hue.
    pub const VALUE: usize = 2;
}

/// A mutable point array.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MappedCurve {
    points: Vec<ControlPoint>,
}

impl MappedCurve {
    /// Curve through the given points.
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    /// Identity curve (y = x).
    pub fn identity() -> Self {
        Self::new(vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 1.0)])
    }

    /// Horizontal line at `y`.
    pub fn flat(y: f32) -> Self {
        Self::new(vec![ControlPoint::new(0.0, y), ControlPoint::new(1.0, y)])
    }

    /// Current points.
    #[inline]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Mutable access to point locations.
    #[inline]
    pub fn points_mut(&mut self) -> &mut [ControlPoint] {
        &mut self.points
    }

    /// Appends a point.
    pub fn add_point(&mut self, x: f32, y: f32) {
        self.points.push(ControlPoint::new(x, y));
    }

    /// Drops the last point.
    pub fn remove_last(&mut self) -> Option<ControlPoint> {
        self.points.pop()
    }

    /// Makes this curve match `target` point for point.
    pub fn reconcile(&mut self, target: &[ControlPoint]) {
        while self.points.len() < target.len() {
            self.add_point(0.0, 0.0);
        }
        while self.points.len() > target.len() {
            self.remove_last();
        }
        for (point, &wanted) in self.points.iter_mut().zip(target) {
            *point = wanted;
        }
    }
}

/// A fixed set of curves owned by one modifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveMapping {
    curves: Vec<MappedCurve>,
}

impl CurveMapping {
    /// RGB curves mapping: red, green, blue and combined, all identity.
    pub fn rgb() -> Self {
        Self {
            curves: vec![MappedCurve::identity(); 4],
        }
    }

    /// Hue-correct mapping: hue, saturation and value, all flat at 0.5
    /// (no change).
    pub fn hue_correct() -> Self {
        Self {
            curves: vec![MappedCurve::flat(0.5); 3],
        }
    }

    /// Number of curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// True when the mapping has no curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// All curves.
    #[inline]
    pub fn curves(&self) -> &[MappedCurve] {
        &self.curves
    }

    /// Curve at `index`.
    pub fn curve(&self, index: usize) -> HostResult<&MappedCurve> {
        let len = self.curves.len();
        self.curves
            .get(index)
            .ok_or(HostError::MissingCurve { index, len })
    }

    /// Mutable curve at `index`.
    pub fn curve_mut(&mut self, index: usize) -> HostResult<&mut MappedCurve> {
        let len = self.curves.len();
        self.curves
            .get_mut(index)
            .ok_or(HostError::MissingCurve { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f32, f32)]) -> Vec<ControlPoint> {
        raw.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn reconcile_grows() {
        let mut curve = MappedCurve::identity();
        let target = pts(&[(0.0, 0.1), (0.25, 0.3), (0.5, 0.5), (1.0, 0.9)]);
        curve.reconcile(&target);
        assert_eq!(curve.points(), target.as_slice());
    }

    #[test]
    fn reconcile_shrinks() {
        let mut curve = MappedCurve::new(pts(&[(0.0, 0.0), (0.3, 0.3), (0.6, 0.6), (1.0, 1.0)]));
        let target = pts(&[(0.0, 0.2), (1.0, 0.8)]);
        curve.reconcile(&target);
        assert_eq!(curve.points(), target.as_slice());
    }

    #[test]
    fn default_mappings() {
        let rgb_map = CurveMapping::rgb();
        assert_eq!(rgb_map.len(), 4);
        assert_eq!(rgb_map.curve(rgb::COMBINED).unwrap(), &MappedCurve::identity());

        let hue = CurveMapping::hue_correct();
        assert_eq!(hue.len(), 3);
        assert!(hue.curve(hsv::SATURATION).unwrap().points().iter().all(|p| p.y == 0.5));
        assert!(matches!(
            hue.curve(3),
            Err(HostError::MissingCurve { index: 3, len: 3 })
        ));
    }
}

//! Core types for converted curves.

use serde::{Deserialize, Serialize};

/// A single control point on a curve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlPoint {
    /// X coordinate (input value).
    pub x: f32,
    /// Y coordinate (output value).
    pub y: f32,
}

impl ControlPoint {
    /// Create a new control point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for ControlPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// RGB curve channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum Channel {
    /// Red channel curve.
    Red = 0,
    /// Green channel curve.
    Green = 1,
    /// Blue channel curve.
    Blue = 2,
}

impl Channel {
    /// All channels in R, G, B order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Lowercase channel name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Control points for one channel, `x` strictly increasing over [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReducedCurve {
    points: Vec<ControlPoint>,
}

impl ReducedCurve {
    /// Wraps control points. See [`ReducedCurve::validate`] for the shape
    /// the builder guarantees.
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    /// Identity curve (y = x).
    pub fn identity() -> Self {
        Self::new(vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 1.0)])
    }

    /// The control points.
    #[inline]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of control points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the curve has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Input positions.
    pub fn xs(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.iter().map(|p| p.x)
    }

    /// Output values.
    pub fn ys(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.iter().map(|p| p.y)
    }

    /// Check if curve is identity (all points on y=x line).
    pub fn is_identity(&self) -> bool {
        self.points.iter().all(|p| (p.x - p.y).abs() < 1e-6)
    }

    /// Validate the curve constraints.
    pub fn validate(&self) -> Result<(), &'static str> {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return Err("Curve must have at least 1 control point");
        };
        if first.x != 0.0 {
            return Err("First control point must be at x = 0");
        }
        if self.points.len() > 1 && last.x != 1.0 {
            return Err("Last control point must be at x = 1");
        }
        if self.points.windows(2).any(|w| w[1].x <= w[0].x) {
            return Err("X coordinates must be strictly increasing");
        }
        Ok(())
    }
}

/// Red, green and blue curves sharing the same `x` positions.
///
/// Deserialization runs [`CurveSet::validate`], so a set read from JSON
/// holds the same guarantees as one from [`crate::build_curve_set`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveSetRepr")]
pub struct CurveSet {
    red: ReducedCurve,
    green: ReducedCurve,
    blue: ReducedCurve,
}

/// Unchecked wire form of [`CurveSet`].
#[derive(Deserialize)]
struct CurveSetRepr {
    red: ReducedCurve,
    green: ReducedCurve,
    blue: ReducedCurve,
}

impl TryFrom<CurveSetRepr> for CurveSet {
    type Error = &'static str;

    fn try_from(repr: CurveSetRepr) -> Result<Self, Self::Error> {
        let set = Self::from_curves(repr.red, repr.green, repr.blue);
        set.validate()?;
        Ok(set)
    }
}

impl CurveSet {
    /// Assembles a set; callers are responsible for alignment. The builder
    /// in [`crate::build_curve_set`] is the checked constructor.
    pub(crate) fn from_curves(red: ReducedCurve, green: ReducedCurve, blue: ReducedCurve) -> Self {
        Self { red, green, blue }
    }

    /// Identity curves on all channels.
    pub fn identity() -> Self {
        Self::from_curves(
            ReducedCurve::identity(),
            ReducedCurve::identity(),
            ReducedCurve::identity(),
        )
    }

    /// Get curve by channel.
    #[inline]
    pub fn get(&self, channel: Channel) -> &ReducedCurve {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Red curve.
    #[inline]
    pub fn red(&self) -> &ReducedCurve {
        &self.red
    }

    /// Green curve.
    #[inline]
    pub fn green(&self) -> &ReducedCurve {
        &self.green
    }

    /// Blue curve.
    #[inline]
    pub fn blue(&self) -> &ReducedCurve {
        &self.blue
    }

    /// Curves paired with their channel, in R, G, B order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &ReducedCurve)> {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Shared point count.
    #[inline]
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// True when the curves have no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Check if all curves are identity.
    pub fn is_identity(&self) -> bool {
        self.iter().all(|(_, c)| c.is_identity())
    }

    /// Validate every curve and that all three share their `x` positions.
    pub fn validate(&self) -> Result<(), &'static str> {
        for (_, curve) in self.iter() {
            curve.validate()?;
        }
        if self.green.len() != self.red.len() || self.blue.len() != self.red.len() {
            return Err("Channels must have the same number of control points");
        }
        if !self.green.xs().eq(self.red.xs()) || !self.blue.xs().eq(self.red.xs()) {
            return Err("Channels must share their x positions");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_validates() {
        let curve = ReducedCurve::identity();
        assert!(curve.validate().is_ok());
        assert!(curve.is_identity());
    }

    #[test]
    fn validation_rules() {
        assert!(ReducedCurve::new(vec![]).validate().is_err());
        assert!(ReducedCurve::new(vec![ControlPoint::new(0.0, 0.3)]).validate().is_ok());

        let not_closed = ReducedCurve::new(vec![(0.0, 0.0).into(), (0.9, 1.0).into()]);
        assert!(not_closed.validate().is_err());

        let repeated = ReducedCurve::new(vec![
            (0.0, 0.0).into(),
            (0.5, 0.2).into(),
            (0.5, 0.4).into(),
            (1.0, 1.0).into(),
        ]);
        assert!(repeated.validate().is_err());
    }

    #[test]
    fn channel_lookup() {
        let set = CurveSet::identity();
        let names: Vec<_> = set.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(names, ["red", "green", "blue"]);
        assert_eq!(set.len(), 2);
        assert!(set.is_identity());
    }

    #[test]
    fn deserialize_checks_alignment() {
        let uneven = serde_json::json!({
            "red": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
            "green": [{"x": 0.0, "y": 0.0}, {"x": 0.5, "y": 0.5}, {"x": 1.0, "y": 1.0}],
            "blue": [{"x": 0.0, "y": 0.0}],
        });
        let err = serde_json::from_value::<CurveSet>(uneven).unwrap_err();
        assert!(err.to_string().contains("same number of control points"));

        let shifted = serde_json::json!({
            "red": [{"x": 0.0, "y": 0.0}, {"x": 0.5, "y": 0.2}, {"x": 1.0, "y": 1.0}],
            "green": [{"x": 0.0, "y": 0.0}, {"x": 0.4, "y": 0.2}, {"x": 1.0, "y": 1.0}],
            "blue": [{"x": 0.0, "y": 0.0}, {"x": 0.5, "y": 0.2}, {"x": 1.0, "y": 1.0}],
        });
        let err = serde_json::from_value::<CurveSet>(shifted).unwrap_err();
        assert!(err.to_string().contains("share their x positions"));

        let broken = serde_json::json!({
            "red": [{"x": 0.0, "y": 0.0}, {"x": 0.0, "y": 1.0}],
            "green": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
            "blue": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
        });
        assert!(serde_json::from_value::<CurveSet>(broken).is_err());
    }

    #[test]
    fn serialized_set_reads_back() {
        let set = crate::build_curve_set(&[0.1, 0.5, 0.9], &[0.0, 0.4, 1.0], &[0.2, 0.2, 0.2])
            .unwrap();
        let value = serde_json::to_value(&set).unwrap();
        let back: CurveSet = serde_json::from_value(value).unwrap();
        assert_eq!(back, set);
        assert!(back.validate().is_ok());
    }
}

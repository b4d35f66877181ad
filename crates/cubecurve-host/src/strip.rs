//! In-memory sequencer strips with modifier stacks.

use crate::mapping::{CurveMapping, hsv, rgb};
use crate::{CurveTarget, HostError, HostResult};
use cubecurve_curve::{Channel, CurveSet};
use serde::Serialize;
use tracing::{debug, trace};

/// Name of the modifier carrying converted LUT curves.
pub const RGB_CURVES_MODIFIER: &str = "LUT RGB Curves";

/// Name of the saturation-zeroing modifier.
pub const DESATURATION_MODIFIER: &str = "Desaturation";

/// Kind of media a strip holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StripKind {
    /// Still image or image sequence.
    Image,
    /// Movie file.
    Movie,
    /// Rendered scene.
    Scene,
    /// Solid color.
    Color,
    /// Audio only; takes no color modifiers.
    Sound,
}

impl StripKind {
    /// True for strips that carry pixels.
    pub fn is_visual(self) -> bool {
        !matches!(self, Self::Sound)
    }

    /// Lowercase kind name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Movie => "movie",
            Self::Scene => "scene",
            Self::Color => "color",
            Self::Sound => "sound",
        }
    }
}

/// Kind of modifier on a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Per-channel RGB curves.
    Curves,
    /// Hue / saturation / value by hue.
    HueCorrect,
}

/// A named modifier and its curves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modifier {
    /// Display name, unique per kind by convention.
    pub name: String,
    /// Modifier type.
    pub kind: ModifierKind,
    /// Curves owned by the modifier.
    pub mapping: CurveMapping,
}

impl Modifier {
    /// Creates a modifier with the default mapping for its kind.
    pub fn new(name: impl Into<String>, kind: ModifierKind) -> Self {
        let mapping = match kind {
            ModifierKind::Curves => CurveMapping::rgb(),
            ModifierKind::HueCorrect => CurveMapping::hue_correct(),
        };
        Self {
            name: name.into(),
            kind,
            mapping,
        }
    }
}

/// A sequencer strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strip {
    /// Strip name.
    pub name: String,
    /// Media kind.
    pub kind: StripKind,
    modifiers: Vec<Modifier>,
}

impl Strip {
    /// Creates a strip without modifiers.
    pub fn new(name: impl Into<String>, kind: StripKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Vec::new(),
        }
    }

    /// Modifier stack, in application order.
    #[inline]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// First modifier matching `name` and `kind`.
    pub fn find_modifier(&self, name: &str, kind: ModifierKind) -> Option<&Modifier> {
        self.modifiers
            .iter()
            .find(|m| m.kind == kind && m.name == name)
    }

    /// Appends a modifier and returns it.
    pub fn add_modifier(&mut self, modifier: Modifier) -> &mut Modifier {
        self.modifiers.push(modifier);
        let last = self.modifiers.len() - 1;
        &mut self.modifiers[last]
    }

    /// Removes every modifier matching `name` and `kind`; returns how many.
    pub fn remove_modifiers(&mut self, name: &str, kind: ModifierKind) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| !(m.kind == kind && m.name == name));
        before - self.modifiers.len()
    }

    /// Replaces any existing modifier of the same name and kind with a fresh
    /// one, so repeated application never stacks.
    fn replace_modifier(&mut self, name: &str, kind: ModifierKind) -> &mut Modifier {
        let removed = self.remove_modifiers(name, kind);
        if removed > 0 {
            debug!(strip = %self.name, modifier = name, removed, "replaced existing modifier");
        }
        self.add_modifier(Modifier::new(name, kind))
    }

    fn ensure_visual(&self) -> HostResult<()> {
        if self.kind.is_visual() {
            Ok(())
        } else {
            Err(HostError::UnsupportedStrip {
                name: self.name.clone(),
                kind: self.kind.name().to_string(),
            })
        }
    }
}

impl CurveTarget for Strip {
    fn apply_rgb_curves(&mut self, curves: &CurveSet) -> HostResult<()> {
        trace!(strip = %self.name, points = curves.len(), "apply_rgb_curves");
        // CurveSet is validated when built or deserialized.
        self.ensure_visual()?;

        let modifier = self.replace_modifier(RGB_CURVES_MODIFIER, ModifierKind::Curves);
        for (channel, index) in [
            (Channel::Red, rgb::RED),
            (Channel::Green, rgb::GREEN),
            (Channel::Blue, rgb::BLUE),
        ] {
            modifier
                .mapping
                .curve_mut(index)?
                .reconcile(curves.get(channel).points());
        }
        Ok(())
    }

    fn apply_desaturation(&mut self) -> HostResult<()> {
        trace!(strip = %self.name, "apply_desaturation");
        self.ensure_visual()?;

        let modifier = self.replace_modifier(DESATURATION_MODIFIER, ModifierKind::HueCorrect);
        // Only saturation; hue and value keep their defaults.
        for point in modifier.mapping.curve_mut(hsv::SATURATION)?.points_mut() {
            point.y = 0.0;
        }
        Ok(())
    }

    fn is_skipped(&self) -> bool {
        !self.kind.is_visual()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappedCurve;
    use cubecurve_curve::build_curve_set;

    fn sample_curves() -> CurveSet {
        build_curve_set(&[0.1, 0.5, 0.9], &[0.0, 0.4, 1.0], &[0.2, 0.2, 0.2]).unwrap()
    }

    #[test]
    fn applies_channels_to_matching_curves() {
        let mut strip = Strip::new("shot_010", StripKind::Movie);
        let curves = sample_curves();
        strip.apply_rgb_curves(&curves).unwrap();

        let modifier = strip
            .find_modifier(RGB_CURVES_MODIFIER, ModifierKind::Curves)
            .expect("modifier added");
        let mapping = &modifier.mapping;
        assert_eq!(mapping.curve(rgb::RED).unwrap().points(), curves.red().points());
        assert_eq!(mapping.curve(rgb::GREEN).unwrap().points(), curves.green().points());
        assert_eq!(mapping.curve(rgb::BLUE).unwrap().points(), curves.blue().points());
        assert_eq!(mapping.curve(rgb::COMBINED).unwrap(), &MappedCurve::identity());
    }

    #[test]
    fn reapplying_replaces_instead_of_stacking() {
        let mut strip = Strip::new("shot_010", StripKind::Image);
        strip.apply_rgb_curves(&sample_curves()).unwrap();
        strip.apply_rgb_curves(&CurveSet::identity()).unwrap();
        strip.apply_desaturation().unwrap();
        strip.apply_desaturation().unwrap();

        assert_eq!(strip.modifiers().len(), 2);
        let curves = &strip.modifiers()[0];
        assert_eq!(curves.name, RGB_CURVES_MODIFIER);
        assert_eq!(curves.mapping.curve(rgb::RED).unwrap().points().len(), 2);
    }

    #[test]
    fn other_modifiers_are_kept() {
        let mut strip = Strip::new("shot_020", StripKind::Scene);
        strip.add_modifier(Modifier::new("Grade", ModifierKind::Curves));
        strip.add_modifier(Modifier::new(RGB_CURVES_MODIFIER, ModifierKind::HueCorrect));
        strip.apply_rgb_curves(&sample_curves()).unwrap();

        let names: Vec<_> = strip.modifiers().iter().map(|m| (m.name.as_str(), m.kind)).collect();
        assert_eq!(
            names,
            vec![
                ("Grade", ModifierKind::Curves),
                (RGB_CURVES_MODIFIER, ModifierKind::HueCorrect),
                (RGB_CURVES_MODIFIER, ModifierKind::Curves),
            ]
        );
    }

    #[test]
    fn desaturation_zeroes_saturation_only() {
        let mut strip = Strip::new("shot_030", StripKind::Image);
        strip.apply_desaturation().unwrap();
        let modifier = strip
            .find_modifier(DESATURATION_MODIFIER, ModifierKind::HueCorrect)
            .unwrap();
        let mapping = &modifier.mapping;
        assert!(mapping.curve(hsv::SATURATION).unwrap().points().iter().all(|p| p.y == 0.0));
        assert_eq!(mapping.curve(hsv::HUE).unwrap(), &MappedCurve::flat(0.5));
        assert_eq!(mapping.curve(hsv::VALUE).unwrap(), &MappedCurve::flat(0.5));
    }

    #[test]
    fn sound_strips_are_rejected() {
        let mut strip = Strip::new("music", StripKind::Sound);
        assert!(matches!(
            strip.apply_rgb_curves(&sample_curves()),
            Err(HostError::UnsupportedStrip { .. })
        ));
        assert!(strip.apply_desaturation().is_err());
        assert!(strip.modifiers().is_empty());
    }

    #[test]
    fn misaligned_curves_never_reach_a_strip() {
        let uneven = serde_json::from_value::<CurveSet>(serde_json::json!({
            "red": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
            "green": [{"x": 0.0, "y": 0.0}, {"x": 0.5, "y": 0.5}, {"x": 1.0, "y": 1.0}],
            "blue": [{"x": 0.0, "y": 0.0}],
        }));
        assert!(uneven.is_err());

        let mut strip = Strip::new("shot_040", StripKind::Image);
        let curves: CurveSet = serde_json::from_value(serde_json::json!({
            "red": [{"x": 0.0, "y": 0.1}, {"x": 1.0, "y": 0.9}],
            "green": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
            "blue": [{"x": 0.0, "y": 0.2}, {"x": 1.0, "y": 0.8}],
        }))
        .unwrap();
        strip.apply_rgb_curves(&curves).unwrap();
        let modifier = strip.find_modifier(RGB_CURVES_MODIFIER, ModifierKind::Curves).unwrap();
        assert_eq!(modifier.mapping.curve(rgb::BLUE).unwrap().points(), curves.blue().points());
    }
}

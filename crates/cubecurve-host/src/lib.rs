//! # cubecurve-host
//!
//! Reference host adapter for converted LUT curves.
//!
//! The conversion core produces an immutable [`CurveSet`]; hosts store
//! curves as mutable point arrays inside per-strip modifiers. This crate
//! defines the seam between the two ([`CurveTarget`]) and an in-memory
//! implementation ([`Strip`]) modelling a sequencer's modifier stack:
//!
//! - converted curves go into a `Curves` modifier named
//!   [`RGB_CURVES_MODIFIER`], replacing any previous one
//! - the optional desaturation goes into a `HueCorrect` modifier named
//!   [`DESATURATION_MODIFIER`] with its saturation curve zeroed
//! - sound strips are skipped
//!
//! # Example
//!
//! ```rust
//! use cubecurve_curve::{Conversion, CurveSet};
//! use cubecurve_host::{apply_conversion, Strip, StripKind};
//!
//! let conversion = Conversion { lut_size: 2, curves: CurveSet::identity(), desaturate: true };
//! let mut strips = vec![
//!     Strip::new("shot", StripKind::Movie),
//!     Strip::new("music", StripKind::Sound),
//! ];
//! let report = apply_conversion(&mut strips, &conversion);
//! assert_eq!(report.applied, 1);
//! assert_eq!(report.skipped, 1);
//! assert_eq!(strips[0].modifiers().len(), 2);
//! ```

#![warn(missing_docs)]

mod error;
pub mod mapping;
mod strip;

pub use error::{HostError, HostResult};
pub use mapping::{CurveMapping, MappedCurve};
pub use strip::{
    DESATURATION_MODIFIER, Modifier, ModifierKind, RGB_CURVES_MODIFIER, Strip, StripKind,
};

use cubecurve_curve::{Conversion, CurveSet};
use tracing::{debug, warn};

/// Something converted curves can be applied to.
///
/// Implementations must make repeated application idempotent: applying
/// twice leaves the same state as applying once.
pub trait CurveTarget {
    /// Installs `curves` as the target's per-channel tone curves.
    fn apply_rgb_curves(&mut self, curves: &CurveSet) -> HostResult<()>;

    /// Removes all color saturation.
    fn apply_desaturation(&mut self) -> HostResult<()>;

    /// Whether the target should be skipped altogether.
    fn is_skipped(&self) -> bool {
        false
    }

    /// Name used in logs and reports.
    fn label(&self) -> String {
        String::from("<target>")
    }
}

impl CurveTarget for Vec<Strip> {
    fn apply_rgb_curves(&mut self, curves: &CurveSet) -> HostResult<()> {
        self.iter_mut()
            .filter(|s| !s.is_skipped())
            .try_for_each(|s| s.apply_rgb_curves(curves))
    }

    fn apply_desaturation(&mut self) -> HostResult<()> {
        self.iter_mut()
            .filter(|s| !s.is_skipped())
            .try_for_each(|s| s.apply_desaturation())
    }
}

/// Outcome of [`apply_conversion`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Targets that received the curves.
    pub applied: usize,
    /// Targets skipped as unsuitable.
    pub skipped: usize,
    /// Targets that failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl ApplyReport {
    /// True if no target failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Applies a conversion to every target, skipping unsuitable ones.
///
/// Desaturation is applied only when the conversion asks for it.
pub fn apply_conversion<T: CurveTarget>(targets: &mut [T], conversion: &Conversion) -> ApplyReport {
    let mut report = ApplyReport::default();

    for target in targets.iter_mut() {
        if target.is_skipped() {
            debug!(target = %target.label(), "skipping target");
            report.skipped += 1;
            continue;
        }

        let result = target.apply_rgb_curves(&conversion.curves).and_then(|_| {
            if conversion.desaturate {
                target.apply_desaturation()
            } else {
                Ok(())
            }
        });

        match result {
            Ok(()) => report.applied += 1,
            Err(e) => {
                warn!(target = %target.label(), error = %e, "failed to apply curves");
                report.failed.push((target.label(), e.to_string()));
            }
        }
    }

    debug!(
        applied = report.applied,
        skipped = report.skipped,
        failed = report.failed.len(),
        "apply_conversion"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubecurve_curve::{ConvertOptions, convert_grid};
    use cubecurve_lut::LutGrid;

    fn conversion(desaturate: bool) -> Conversion {
        let options = ConvertOptions::default().with_desaturate(desaturate);
        convert_grid(&LutGrid::identity(5).unwrap(), &options).unwrap()
    }

    #[test]
    fn desaturation_only_when_requested() {
        let mut strips = vec![Strip::new("a", StripKind::Image)];
        let report = apply_conversion(&mut strips, &conversion(false));
        assert!(report.is_success());
        assert_eq!(strips[0].modifiers().len(), 1);
        assert!(strips[0].find_modifier(DESATURATION_MODIFIER, ModifierKind::HueCorrect).is_none());

        let report = apply_conversion(&mut strips, &conversion(true));
        assert_eq!(report.applied, 1);
        assert_eq!(strips[0].modifiers().len(), 2);
    }

    #[test]
    fn reports_skipped_sound_strips() {
        let mut strips = vec![
            Strip::new("a", StripKind::Image),
            Strip::new("b", StripKind::Sound),
            Strip::new("c", StripKind::Color),
        ];
        let report = apply_conversion(&mut strips, &conversion(true));
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped, 1);
        assert!(strips[1].modifiers().is_empty());
    }

    #[test]
    fn strip_list_as_single_target() {
        let mut strips = vec![
            Strip::new("a", StripKind::Image),
            Strip::new("b", StripKind::Sound),
        ];
        strips.apply_rgb_curves(&conversion(false).curves).unwrap();
        assert_eq!(strips[0].modifiers().len(), 1);
        assert!(strips[1].modifiers().is_empty());
    }

    struct Failing;

    impl CurveTarget for Failing {
        fn apply_rgb_curves(&mut self, _: &CurveSet) -> HostResult<()> {
            Err(HostError::MissingCurve { index: 0, len: 0 })
        }

        fn apply_desaturation(&mut self) -> HostResult<()> {
            Ok(())
        }
    }

    #[test]
    fn failures_are_collected() {
        let mut targets = [Failing, Failing];
        let report = apply_conversion(&mut targets, &conversion(false));
        assert_eq!(report.applied, 0);
        assert_eq!(report.failed.len(), 2);
        assert!(!report.is_success());
    }
}

//! End-to-end conversion: `.cube` text to a [`CurveSet`].
//!
//! Parser → diagonal extractor → resampler → builder. Every stage is a pure
//! function; a conversion either yields a complete result or an error.

use crate::resample::{DEFAULT_MAX_POINTS, resample_channels};
use crate::{CurveError, CurveResult, CurveSet, build_curve_set};
use cubecurve_lut::{LutError, LutGrid, MIN_GRID_SIZE, ParseMode, cube, extract_diagonal};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

/// Conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Upper bound on control points per channel.
    pub max_points: usize,
    /// Ask the host to desaturate as well. Not interpreted here.
    pub desaturate: bool,
    /// Handling of unrecognised lines in the `.cube` file.
    pub parse_mode: ParseMode,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            desaturate: false,
            parse_mode: ParseMode::Lenient,
        }
    }
}

impl ConvertOptions {
    /// Sets the point bound.
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Sets the desaturate pass-through flag.
    pub fn with_desaturate(mut self, desaturate: bool) -> Self {
        self.desaturate = desaturate;
        self
    }

    /// Sets the parse mode.
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }
}

/// A finished conversion, ready for a host to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Grid size of the source LUT.
    pub lut_size: usize,
    /// The per-channel curves.
    pub curves: CurveSet,
    /// Whether the host should also desaturate.
    pub desaturate: bool,
}

/// Converts `.cube` file contents with default lenient parsing.
///
/// # Example
///
/// ```rust
/// use cubecurve_curve::{convert, DEFAULT_MAX_POINTS};
///
/// let text = "LUT_3D_SIZE 2\n\
///             0 0 0\n1 0 0\n0 1 0\n1 1 0\n\
///             0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
/// let curves = convert(text, DEFAULT_MAX_POINTS).unwrap();
/// assert!(curves.is_identity());
/// ```
pub fn convert(contents: &str, max_points: usize) -> CurveResult<CurveSet> {
    let options = ConvertOptions::default().with_max_points(max_points);
    convert_with(contents, &options).map(|c| c.curves)
}

/// Converts `.cube` file contents.
pub fn convert_with(contents: &str, options: &ConvertOptions) -> CurveResult<Conversion> {
    check_options(options)?;
    let grid = cube::parse_str(contents, options.parse_mode)?;
    convert_grid(&grid, options)
}

/// Reads and converts a `.cube` file.
///
/// Read failures surface as `FileUnreadable`.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> CurveResult<Conversion> {
    check_options(options)?;
    let grid = cube::read_3d(path, options.parse_mode)?;
    convert_grid(&grid, options)
}

/// Converts an already parsed grid.
///
/// Grids below [`MIN_GRID_SIZE`] fail with `InvalidSize`; their diagonal
/// cannot span both curve endpoints.
pub fn convert_grid(grid: &LutGrid, options: &ConvertOptions) -> CurveResult<Conversion> {
    trace!(size = grid.size(), max_points = options.max_points, "convert_grid");
    check_options(options)?;
    if grid.size() < MIN_GRID_SIZE {
        return Err(LutError::InvalidSize(format!(
            "grid size must be at least {}, got {}",
            MIN_GRID_SIZE,
            grid.size()
        ))
        .into());
    }

    let diagonal = extract_diagonal(grid)?;
    let [r, g, b] = resample_channels(&diagonal.channels(), options.max_points)?;
    let curves = build_curve_set(&r, &g, &b)?;

    debug!(
        size = grid.size(),
        points = curves.len(),
        desaturate = options.desaturate,
        "converted LUT to curves"
    );

    Ok(Conversion {
        lut_size: grid.size(),
        curves,
        desaturate: options.desaturate,
    })
}

fn check_options(options: &ConvertOptions) -> CurveResult<()> {
    if options.max_points == 0 {
        return Err(CurveError::InvalidMaxPoints(0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_text(grid: &LutGrid) -> String {
        cube::format_3d(grid, Some("test"))
    }

    #[test]
    fn identity_scenario() {
        let text = cube_text(&LutGrid::identity(2).unwrap());
        let curves = convert(&text, DEFAULT_MAX_POINTS).unwrap();
        for (_, curve) in curves.iter() {
            let pts: Vec<(f32, f32)> = curve.points().iter().map(|p| (p.x, p.y)).collect();
            assert_eq!(pts, vec![(0.0, 0.0), (1.0, 1.0)]);
        }
    }

    #[test]
    fn point_count_is_min_of_size_and_bound() {
        let text = cube_text(&LutGrid::identity(9).unwrap());
        for (m, expected) in [(1, 1), (4, 4), (9, 9), (256, 9)] {
            let curves = convert(&text, m).unwrap();
            assert_eq!(curves.len(), expected, "max_points = {m}");
        }
    }

    #[test]
    fn options_pass_desaturate_through() {
        let text = cube_text(&LutGrid::identity(3).unwrap());
        let options = ConvertOptions::default().with_desaturate(true);
        let conv = convert_with(&text, &options).unwrap();
        assert!(conv.desaturate);
        assert_eq!(conv.lut_size, 3);
        assert_eq!(conv.curves.len(), 3);
    }

    #[test]
    fn parse_errors_propagate() {
        let err = convert("LUT_3D_SIZE 4\n0 0 0\n", 256).unwrap_err();
        assert!(matches!(err, CurveError::Lut(LutError::SizeMismatch { .. })));

        let err = convert("# nothing here\n", 256).unwrap_err();
        assert!(matches!(err, CurveError::Lut(LutError::MissingSize)));
    }

    #[test]
    fn degenerate_sizes_never_convert() {
        for text in ["LUT_3D_SIZE 0\n", "LUT_3D_SIZE 1\n0.5 0.5 0.5\n"] {
            let err = convert(text, DEFAULT_MAX_POINTS).unwrap_err();
            assert!(matches!(err, CurveError::Lut(LutError::InvalidSize(_))), "{text:?}");
        }
    }

    #[test]
    fn every_grid_yields_closed_curves() {
        let options = ConvertOptions::default();
        for size in [2, 3, 5] {
            let conv = convert_grid(&LutGrid::identity(size).unwrap(), &options).unwrap();
            for (_, curve) in conv.curves.iter() {
                assert!(curve.validate().is_ok());
                assert_eq!(curve.points().last().unwrap().x, 1.0);
            }
        }
    }

    #[test]
    fn zero_bound_rejected_before_parsing() {
        let err = convert("", 0).unwrap_err();
        assert!(matches!(err, CurveError::InvalidMaxPoints(0)));
    }

    #[test]
    fn missing_file() {
        let err = convert_file("/nonexistent/look.cube", &ConvertOptions::default()).unwrap_err();
        assert!(err.is_file_unreadable());
    }

    #[test]
    fn options_serde_defaults() {
        let options: ConvertOptions = serde_json::from_str(r#"{"desaturate": true}"#).unwrap();
        assert_eq!(options.max_points, DEFAULT_MAX_POINTS);
        assert!(options.desaturate);
        assert_eq!(options.parse_mode, ParseMode::Lenient);

        let strict: ConvertOptions = serde_json::from_str(r#"{"parse_mode": "strict"}"#).unwrap();
        assert_eq!(strict.parse_mode, ParseMode::Strict);
    }
}

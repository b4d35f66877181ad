//! Error types for curve conversion.

use cubecurve_lut::LutError;
use thiserror::Error;

/// Error type for LUT-to-curve conversion.
#[derive(Error, Debug)]
pub enum CurveError {
    /// Reading the LUT or sampling its diagonal failed.
    #[error(transparent)]
    Lut(#[from] LutError),

    /// The three channels handed to the builder differ in length.
    #[error("channel length mismatch: red {red}, green {green}, blue {blue}")]
    ChannelLengthMismatch {
        /// Red sample count
        red: usize,
        /// Green sample count
        green: usize,
        /// Blue sample count
        blue: usize,
    },

    /// `max_points` must allow at least one point.
    #[error("invalid max points: {0} (must be >= 1)")]
    InvalidMaxPoints(usize),
}

impl CurveError {
    /// True if the source file could not be read.
    pub fn is_file_unreadable(&self) -> bool {
        matches!(self, Self::Lut(LutError::FileUnreadable(_)))
    }
}

/// Result type for curve conversion.
pub type CurveResult<T> = Result<T, CurveError>;

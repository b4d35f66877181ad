//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while reading a LUT or sampling its diagonal.
#[derive(Debug, Error)]
pub enum LutError {
    /// The source file could not be read.
    #[error("cannot read LUT file: {0}")]
    FileUnreadable(#[from] std::io::Error),

    /// No `LUT_3D_SIZE` line was found.
    #[error("invalid .cube file: missing LUT_3D_SIZE")]
    MissingSize,

    /// Entry count does not match `size^3`.
    #[error("invalid .cube file: expected {expected} entries for size {size}, found {found}")]
    SizeMismatch {
        /// Declared grid size
        size: usize,
        /// `size^3`
        expected: usize,
        /// Number of RGB rows read
        found: usize,
    },

    /// The declared size is not an integer or is below the minimum of 2.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// A data line could not be read as an RGB row (strict mode only).
    #[error("malformed line {line}: {content:?}")]
    MalformedLine {
        /// 1-based line number
        line: usize,
        /// Trimmed line content
        content: String,
    },

    /// A diagonal index fell outside the entry table.
    #[error("diagonal index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// Computed flat index
        index: usize,
        /// Length of the entry table
        len: usize,
    },
}

impl LutError {
    /// Returns true for the structural errors a `.cube` file can fail with
    /// after being read completely (missing size, wrong entry count).
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::MissingSize | Self::SizeMismatch { .. })
    }
}

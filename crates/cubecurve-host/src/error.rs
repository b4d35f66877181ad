//! Host adapter error types.

use thiserror::Error;

/// Result type for host-side application.
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised while applying curves to host objects.
#[derive(Debug, Error)]
pub enum HostError {
    /// The strip cannot carry color modifiers.
    #[error("strip '{name}' ({kind}) does not support color modifiers")]
    UnsupportedStrip {
        /// Strip name
        name: String,
        /// Strip kind
        kind: String,
    },

    /// A curve mapping has fewer curves than the modifier needs.
    #[error("curve index {index} out of range ({len} curves)")]
    MissingCurve {
        /// Requested curve index
        index: usize,
        /// Curves in the mapping
        len: usize,
    },
}

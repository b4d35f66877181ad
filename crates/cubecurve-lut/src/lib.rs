//! # cubecurve-lut
//!
//! 3D LUT reading and neutral-diagonal sampling.
//!
//! This crate is the front half of the LUT-to-curves pipeline: it parses a
//! `.cube` file into a [`LutGrid`] and extracts the grid's neutral diagonal
//! as [`DiagonalSamples`], one RGB triplet per grid level.
//!
//! # Usage
//!
//! ```rust
//! use cubecurve_lut::{cube, extract_diagonal, ParseMode};
//!
//! let text = "LUT_3D_SIZE 2\n\
//!             0 0 0\n1 0 0\n0 1 0\n1 1 0\n\
//!             0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let grid = cube::parse_str(text, ParseMode::Lenient).unwrap();
//! let diag = extract_diagonal(&grid).unwrap();
//! assert_eq!(diag.len(), 2);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `cubecurve-curve` - Curve building

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod grid;
mod diagonal;
pub mod cube;

pub use error::{LutError, LutResult};
pub use grid::{LutGrid, MIN_GRID_SIZE};
pub use diagonal::{DiagonalSamples, diagonal_index, extract_diagonal};
pub use cube::{ParseMode, parse_str as parse_cube, read_3d as read_cube};

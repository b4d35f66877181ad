//! # cubecurve-curve
//!
//! Turns a 3D LUT into three bounded, index-aligned per-channel curves.
//!
//! The LUT's neutral diagonal (from `cubecurve-lut`) is split per channel,
//! reduced to at most `max_points` values by piecewise-linear resampling and
//! paired with evenly spaced `x` positions. The result is a [`CurveSet`]
//! that a host tone-curve transform can consume directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use cubecurve_curve::{convert_file, ConvertOptions};
//!
//! let conv = convert_file("look.cube", &ConvertOptions::default())?;
//! for (channel, curve) in conv.curves.iter() {
//!     println!("{channel}: {} points", curve.len());
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`cubecurve-lut`] - `.cube` parsing and diagonal extraction
//! - [`thiserror`] - Error handling
//! - [`serde`] - Serializable results
//!
//! # Used By
//!
//! - `cubecurve-host` - Applying curves to host objects
//! - `cubecurve-cli` - Command-line front end

#![warn(missing_docs)]

mod error;
mod types;
mod builder;
mod convert;
pub mod resample;

pub use error::{CurveError, CurveResult};
pub use types::{Channel, ControlPoint, CurveSet, ReducedCurve};
pub use builder::build_curve_set;
pub use resample::{DEFAULT_MAX_POINTS, resample, resample_channels};
pub use convert::{Conversion, ConvertOptions, convert, convert_file, convert_grid, convert_with};

pub use cubecurve_lut::ParseMode;

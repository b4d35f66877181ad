//! Adobe/Resolve .cube 3D LUT reading.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Rows are RGB output triplets with red varying fastest. Only the size
//! header and the rows are consumed; everything else is metadata.
//!
//! # Example
//!
//! ```rust,ignore
//! use cubecurve_lut::cube::{self, ParseMode};
//!
//! let grid = cube::read_3d("grade.cube", ParseMode::Lenient)?;
//! ```

use crate::{LutError, LutGrid, LutResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Header keywords that strict mode accepts without consuming.
const KNOWN_KEYWORDS: &[&str] = &["DOMAIN_MIN", "DOMAIN_MAX", "LUT_3D_INPUT_RANGE"];

/// How to treat lines that are neither headers nor RGB rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip any line that is not exactly three numbers.
    ///
    /// Tolerates extension headers, and also lets corrupt rows through
    /// unnoticed until the final entry-count check.
    #[default]
    Lenient,
    /// Fail on any unrecognised line.
    Strict,
}

/// Reads a 3D LUT from a .cube file.
///
/// I/O failures surface as [`LutError::FileUnreadable`].
pub fn read_3d<P: AsRef<Path>>(path: P, mode: ParseMode) -> LutResult<LutGrid> {
    let path = path.as_ref();
    trace!(path = %path.display(), ?mode, "cube::read_3d");
    let file = File::open(path)?;
    parse_3d(BufReader::new(file), mode)
}

/// Parses a 3D LUT from in-memory file contents.
pub fn parse_str(contents: &str, mode: ParseMode) -> LutResult<LutGrid> {
    parse_3d(Cursor::new(contents), mode)
}

/// Parses a 3D LUT from a reader.
pub fn parse_3d<R: BufRead>(reader: R, mode: ParseMode) -> LutResult<LutGrid> {
    let mut size: Option<usize> = None;
    let mut data: Vec<[f32; 3]> = Vec::new();
    let mut headers = 0usize;
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if is_title(line) {
            continue;
        } else if line.starts_with("LUT_3D_SIZE") {
            size = Some(parse_size(line)?);
        } else if let Some(rgb) = parse_rgb(line) {
            data.push(rgb);
        } else if is_known_keyword(line) {
            headers += 1;
        } else if mode == ParseMode::Strict {
            return Err(LutError::MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            });
        } else {
            trace!(line = idx + 1, content = line, "skipping line");
            skipped += 1;
        }
    }

    if headers > 0 {
        debug!(headers, "ignored domain headers");
    }
    if skipped > 0 {
        warn!(skipped, "skipped lines that are not RGB rows");
    }

    let size = size.ok_or(LutError::MissingSize)?;
    debug!(size, entries = data.len(), "parsed .cube");
    LutGrid::from_entries(size, data)
}

/// Formats a grid as .cube text.
pub fn format_3d(grid: &LutGrid, title: Option<&str>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_into(&mut out, grid, title);
    out
}

/// Writes a grid to a .cube file.
pub fn write_3d<P: AsRef<Path>>(path: P, grid: &LutGrid, title: Option<&str>) -> LutResult<()> {
    let mut file = File::create(path.as_ref())?;
    file.write_all(format_3d(grid, title).as_bytes())?;
    Ok(())
}

fn write_into(out: &mut String, grid: &LutGrid, title: Option<&str>) -> std::fmt::Result {
    writeln!(out, "# Generated by cubecurve")?;
    if let Some(title) = title {
        writeln!(out, "TITLE \"{}\"", title)?;
    }
    writeln!(out, "LUT_3D_SIZE {}", grid.size())?;
    writeln!(out)?;
    // Entries are already in file order (R fastest).
    for rgb in grid.entries() {
        writeln!(out, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
    }
    Ok(())
}

// Helper functions

fn is_title(line: &str) -> bool {
    line.get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case("TITLE"))
}

fn is_known_keyword(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|kw| KNOWN_KEYWORDS.contains(&kw))
}

/// Size is the last token on the line.
fn parse_size(line: &str) -> LutResult<usize> {
    let token = line.split_whitespace().last().unwrap_or_default();
    token
        .parse()
        .map_err(|_| LutError::InvalidSize(format!("invalid size value {:?}", token)))
}

/// Exactly three numeric tokens, or nothing.
fn parse_rgb(line: &str) -> Option<[f32; 3]> {
    let mut parts = line.split_whitespace();
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some([r, g, b])
}

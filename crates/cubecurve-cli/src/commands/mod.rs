//! CLI command implementations

pub mod info;
pub mod convert;
pub mod apply;
pub mod batch;

use anyhow::{Context, Result, bail};
use cubecurve_curve::{Conversion, ConvertOptions, convert_file};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Convert a LUT file
pub fn load_conversion(path: &Path, options: &ConvertOptions) -> Result<Conversion> {
    convert_file(path, options)
        .with_context(|| format!("Failed to convert: {}", path.display()))
}

/// Serialize `value` as pretty JSON into `path`
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write: {}", path.display()))
}

/// `<output_dir>/<input stem>.json`
pub fn json_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("curves");
    output_dir.join(format!("{}.json", stem))
}

/// Output paths for `inputs`, in order.
///
/// Fails if two inputs would write the same file, e.g. `a/look.cube` and
/// `b/look.cube`.
pub fn json_output_paths(inputs: &[PathBuf], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut outputs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = json_output_path(input, output_dir);
        if let Some(first) = seen.insert(output.clone(), input) {
            bail!(
                "{} and {} would both write {}",
                first.display(),
                input.display(),
                output.display()
            );
        }
        outputs.push(output);
    }
    Ok(outputs)
}

/// Human-readable listing of a conversion
pub fn format_conversion(conversion: &Conversion) -> String {
    let mut out = String::new();
    let curves = &conversion.curves;
    let _ = writeln!(
        out,
        "LUT size {} -> {} points per channel{}",
        conversion.lut_size,
        curves.len(),
        if conversion.desaturate { " (desaturate)" } else { "" }
    );
    for (channel, curve) in curves.iter() {
        let _ = writeln!(out, "{}:", channel);
        for p in curve.points() {
            let _ = writeln!(out, "  {:.6} {:.6}", p.x, p.y);
        }
    }
    out
}

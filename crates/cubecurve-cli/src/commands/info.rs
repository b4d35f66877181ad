//! LUT info command

use crate::{InfoArgs, OutputFormat};
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use cubecurve_lut::{ParseMode, extract_diagonal, read_cube};
use serde::Serialize;
use std::path::Path;

/// Summary of one LUT file.
#[derive(Debug, Serialize)]
struct LutInfo {
    path: String,
    size: usize,
    entries: usize,
    diagonal: Vec<[f32; 3]>,
}

pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    let mode = if args.strict { ParseMode::Strict } else { ParseMode::Lenient };

    let infos = args
        .input
        .iter()
        .map(|path| describe(path, mode))
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
        OutputFormat::Text => {
            for info in &infos {
                print_text(info, verbose);
            }
        }
    }
    Ok(())
}

fn describe(path: &Path, mode: ParseMode) -> Result<LutInfo> {
    trace!(path = %path.display(), "info::describe");
    let grid = read_cube(path, mode)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    let diagonal = extract_diagonal(&grid)?;
    info!(path = %path.display(), size = grid.size(), "read LUT");

    Ok(LutInfo {
        path: path.display().to_string(),
        size: grid.size(),
        entries: grid.entries().len(),
        diagonal: diagonal.samples().to_vec(),
    })
}

fn print_text(info: &LutInfo, verbose: u8) {
    println!("{}", info.path);
    println!("  Grid:     {0}x{0}x{0} ({1} entries)", info.size, info.entries);

    let (first, last) = match (info.diagonal.first(), info.diagonal.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return,
    };
    println!("  Black:    {:.6} {:.6} {:.6}", first[0], first[1], first[2]);
    println!("  White:    {:.6} {:.6} {:.6}", last[0], last[1], last[2]);

    if verbose > 0 {
        println!("  Diagonal:");
        for (n, rgb) in info.diagonal.iter().enumerate() {
            println!("    {:3}: {:.6} {:.6} {:.6}", n, rgb[0], rgb[1], rgb[2]);
        }
    }
}

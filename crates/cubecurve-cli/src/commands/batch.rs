//! Batch conversion command

use crate::BatchArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use rayon::prelude::*;
use cubecurve_curve::ConvertOptions;

pub fn run(args: BatchArgs, verbose: u8) -> Result<()> {
    trace!(pattern = %args.input, "batch::run");

    // Find matching files
    let files: Vec<PathBuf> = glob::glob(&args.input)?
        .filter_map(|r| r.ok())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.input);
    }

    info!(files = files.len(), pattern = %args.input, "Starting batch conversion");

    if verbose > 0 {
        println!("Found {} files matching '{}'", files.len(), args.input);
    }

    // Same-stem inputs from different directories would race on one file
    let outputs = super::json_output_paths(&files, &args.output_dir)?;

    // Create output directory
    std::fs::create_dir_all(&args.output_dir)?;

    let options = args.curve.options();

    // Process files in parallel
    let results: Vec<Result<()>> = files
        .par_iter()
        .zip(outputs.par_iter())
        .map(|(input, output)| process_file(input, output, &options, verbose))
        .collect();

    // Report results
    let mut success = 0;
    let mut failed = 0;
    for r in results {
        match r {
            Ok(_) => success += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {:#}", e);
            }
        }
    }

    info!(success = success, failed = failed, "Batch conversion complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }

    Ok(())
}

fn process_file(input: &Path, output: &Path, options: &ConvertOptions, verbose: u8) -> Result<()> {
    if verbose > 0 {
        println!("Converting {} -> {}", input.display(), output.display());
    }

    let conversion = super::load_conversion(input, options)?;
    super::write_json(output, &conversion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CurveOpts;
    use cubecurve_lut::{LutGrid, cube};

    fn args(pattern: &Path, output_dir: PathBuf) -> BatchArgs {
        BatchArgs {
            input: pattern.to_string_lossy().into_owned(),
            output_dir,
            curve: CurveOpts { max_points: 4, desaturate: false, strict: false },
        }
    }

    #[test]
    fn clashing_stems_fail_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let grid = LutGrid::identity(3).unwrap();
        for sub in ["a", "b"] {
            std::fs::create_dir(dir.path().join(sub)).unwrap();
            cube::write_3d(dir.path().join(sub).join("look.cube"), &grid, None).unwrap();
        }
        let out = dir.path().join("out");

        let err = run(args(&dir.path().join("*").join("look.cube"), out.clone()), 0).unwrap_err();
        assert!(err.to_string().contains("would both write"));
        assert!(!out.exists());
    }

    #[test]
    fn writes_one_json_per_input() {
        let dir = tempfile::tempdir().unwrap();
        let grid = LutGrid::identity(3).unwrap();
        for name in ["look.cube", "film.cube"] {
            cube::write_3d(dir.path().join(name), &grid, None).unwrap();
        }
        let out = dir.path().join("out");

        run(args(&dir.path().join("*.cube"), out.clone()), 0).unwrap();
        let text = std::fs::read_to_string(out.join("film.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["lut_size"], 3);
        assert_eq!(value["curves"]["red"].as_array().unwrap().len(), 3);
        assert!(out.join("look.json").exists());
    }
}

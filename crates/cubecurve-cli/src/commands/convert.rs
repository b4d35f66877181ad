//! LUT to curves conversion command

use crate::{ConvertArgs, OutputFormat};
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Result, bail};
use cubecurve_curve::Conversion;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    let options = args.curve.options();
    trace!(inputs = args.input.len(), ?options, "convert::run");

    let format = resolve_format(args.format, args.output_dir.as_deref())?;
    // Output clashes fail before anything is converted.
    let outputs = match &args.output_dir {
        Some(dir) => Some(super::json_output_paths(&args.input, dir)?),
        None => None,
    };

    // Inputs are independent; convert in parallel, report in order.
    let results: Vec<(&PathBuf, Result<Conversion>)> = args
        .input
        .par_iter()
        .map(|path| (path, super::load_conversion(path, &options)))
        .collect();

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut failed = 0;
    for (i, (path, result)) in results.into_iter().enumerate() {
        let conversion = match result {
            Ok(c) => c,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {:#}", e);
                continue;
            }
        };

        if let Some(output) = outputs.as_ref().map(|o| &o[i]) {
            super::write_json(output, &conversion)?;
            info!(input = %path.display(), output = %output.display(), "wrote curves");
            if verbose > 0 {
                println!("{} -> {}", path.display(), output.display());
            }
            continue;
        }

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&conversion)?),
            OutputFormat::Text => {
                if args.input.len() > 1 {
                    println!("# {}", path.display());
                }
                print!("{}", super::format_conversion(&conversion));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, args.input.len());
    }
    Ok(())
}

/// `--output-dir` only writes JSON; asking for text there is an error.
fn resolve_format(format: Option<OutputFormat>, output_dir: Option<&Path>) -> Result<OutputFormat> {
    match (format, output_dir) {
        (Some(OutputFormat::Text), Some(dir)) => bail!(
            "--format text cannot be used with --output-dir {} (files are always JSON)",
            dir.display()
        ),
        (Some(format), _) => Ok(format),
        (None, Some(_)) => Ok(OutputFormat::Json),
        (None, None) => Ok(OutputFormat::Text),
    }
}

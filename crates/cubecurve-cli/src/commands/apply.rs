//! Apply converted curves to in-memory strips

use crate::{ApplyArgs, OutputFormat};
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Result, bail};
use cubecurve_host::{Strip, StripKind, apply_conversion};

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "apply::run");
    // Convert fully before touching any strip.
    let conversion = super::load_conversion(&args.input, &args.curve.options())?;

    let mut strips: Vec<Strip> = args
        .strips
        .iter()
        .map(|name| Strip::new(name.as_str(), StripKind::Movie))
        .chain(args.sounds.iter().map(|name| Strip::new(name.as_str(), StripKind::Sound)))
        .collect();

    let report = apply_conversion(&mut strips, &conversion);
    info!(applied = report.applied, skipped = report.skipped, "applied curves");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&strips)?),
        OutputFormat::Text => {
            for strip in &strips {
                println!("{} ({})", strip.name, strip.kind.name());
                for modifier in strip.modifiers() {
                    let counts: Vec<String> = modifier
                        .mapping
                        .curves()
                        .iter()
                        .map(|c| c.points().len().to_string())
                        .collect();
                    println!(
                        "  {} [{:?}] points: {}",
                        modifier.name,
                        modifier.kind,
                        counts.join("/")
                    );
                }
            }
            if verbose > 0 {
                println!(
                    "Applied: {}, skipped: {}, failed: {}",
                    report.applied,
                    report.skipped,
                    report.failed.len()
                );
            }
        }
    }

    if !report.is_success() {
        for (name, err) in &report.failed {
            eprintln!("Error: {}: {}", name, err);
        }
        bail!("{} strips failed", report.failed.len());
    }
    Ok(())
}

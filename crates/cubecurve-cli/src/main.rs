//! cubecurve - .cube LUT to RGB curves converter
//!
//! Reduces a 3D LUT to the per-channel control points of its neutral
//! diagonal, ready for a tone-curve modifier.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use cubecurve_curve::{ConvertOptions, DEFAULT_MAX_POINTS, ParseMode};

mod commands;

#[derive(Parser)]
#[command(name = "cubecurve")]
#[command(author, version, about = "Convert .cube 3D LUTs into RGB curve control points")]
#[command(long_about = "
Samples the neutral diagonal of a 3D LUT and reduces it to at most
--max-points control points per channel.

Examples:
  cubecurve info look.cube                  # Grid size and diagonal
  cubecurve convert look.cube               # Print R/G/B control points
  cubecurve convert a.cube b.cube -f json -o curves/
  cubecurve convert look.cube -m 16 --strict
  cubecurve apply look.cube --strip shot_010 --desaturate
  cubecurve batch -i 'luts/*.cube' -o curves/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show LUT grid information and its neutral diagonal
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert LUTs to curve control points
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Convert a LUT and apply it to in-memory strips
    Apply(ApplyArgs),

    /// Convert every LUT matching a pattern
    Batch(BatchArgs),
}

/// Output format for curve data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// JSON document
    Json,
}

/// Options shared by every converting command.
#[derive(Args, Clone, Copy)]
pub struct CurveOpts {
    /// Maximum control points per channel
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_POINTS)]
    max_points: usize,

    /// Request desaturation from the host
    #[arg(long)]
    desaturate: bool,

    /// Fail on lines that are not headers or RGB rows
    #[arg(long)]
    strict: bool,
}

impl CurveOpts {
    /// Conversion options for these flags.
    pub fn options(&self) -> ConvertOptions {
        let mode = if self.strict { ParseMode::Strict } else { ParseMode::Lenient };
        ConvertOptions::default()
            .with_max_points(self.max_points)
            .with_desaturate(self.desaturate)
            .with_parse_mode(mode)
    }
}

#[derive(Args)]
pub struct InfoArgs {
    /// Input LUT(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Fail on lines that are not headers or RGB rows
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input LUT(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    #[command(flatten)]
    curve: CurveOpts,

    /// Output format [default: text, or json with --output-dir]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write one <stem>.json per input here instead of printing (JSON only)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Input LUT
    input: PathBuf,

    #[command(flatten)]
    curve: CurveOpts,

    /// Visual strip to apply to (repeatable)
    #[arg(short, long = "strip", default_value = "Strip")]
    strips: Vec<String>,

    /// Sound strip in the selection (repeatable, always skipped)
    #[arg(long = "sound")]
    sounds: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Input pattern (glob)
    #[arg(short, long)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    #[command(flatten)]
    curve: CurveOpts,
}

/// Installs the tracing subscriber; `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log.as_ref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
    }
}

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{debug, info, warn, LevelFilter};
use std::io;
use std::path::PathBuf;

use sfscale::config::{OutputFormat, SweepConfig};
use sfscale::config_loader::load_config;
use sfscale::oracle::EvaluatorOracle;
use sfscale::report::RecordWriter;
use sfscale::sweep;
use sfscale::utils::validate_binary_spec;

/// Determine the largest Slim Fly network possible for each radix in a
/// range, given a minimum bisection bandwidth
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Slim Fly search executable (path or name in PATH)
    #[arg(required_unless_present = "config")]
    evaluator: Option<String>,

    /// Minimum radix to search
    #[arg(required_unless_present = "config")]
    min_radix: Option<u64>,

    /// Maximum radix to search (limited by --radix-cap)
    #[arg(required_unless_present = "config")]
    max_radix: Option<u64>,

    /// Minimum bisection bandwidth
    #[arg(required_unless_present = "config")]
    min_bandwidth: Option<f64>,

    /// Turn on verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Read the sweep configuration from a YAML file instead
    #[arg(short, long, conflicts_with_all = ["evaluator", "min_radix", "max_radix", "min_bandwidth"])]
    config: Option<PathBuf>,

    /// Terminal count assumed feasible at every radix [default: 2]
    #[arg(long)]
    low_bound: Option<u64>,

    /// Dimensions of the unreachable ceiling radix^(dimensions+1) [default: 2]
    #[arg(long)]
    dimensions: Option<u32>,

    /// Largest radix ever searched [default: 51]
    #[arg(long)]
    radix_cap: Option<u64>,

    /// Monotonicity spot-check probes per radix (0 disables)
    #[arg(long)]
    verify_points: Option<u32>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

/// Output formats accepted by `--format`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    /// Comma-separated values with a header line
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Logger writing to stderr. Verbose runs always show this crate's
/// progress, even when `RUST_LOG` asks for less.
fn logger_builder(env: Env, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);
    }
    builder
}

/// Build the run configuration from the YAML file or positionals, then
/// apply flag overrides
fn build_config(args: &Args) -> Result<SweepConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let (Some(evaluator), Some(min_radix), Some(max_radix), Some(min_bandwidth)) =
                (&args.evaluator, args.min_radix, args.max_radix, args.min_bandwidth)
            else {
                return Err(eyre!("evaluator, min_radix, max_radix and min_bandwidth are required"));
            };
            SweepConfig::new(evaluator, min_radix, max_radix, min_bandwidth)
        }
    };

    config.verbose |= args.verbose;
    if let Some(low_bound) = args.low_bound {
        config.bounds.low_bound = low_bound;
    }
    if let Some(dimensions) = args.dimensions {
        config.bounds.dimensions = dimensions;
    }
    if let Some(radix_cap) = args.radix_cap {
        config.bounds.radix_cap = radix_cap;
    }
    if let Some(verify_points) = args.verify_points {
        config.verify_points = verify_points;
    }
    if let Some(format) = args.format {
        config.format = format.into();
    }

    config.validate().wrap_err("Invalid sweep configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();
    let config = build_config(&args)?;

    // Progress goes to stderr; stdout carries only records
    let default_filter = if config.verbose { "debug" } else { "warn" };
    logger_builder(Env::default().default_filter_or(default_filter), config.verbose).init();

    debug!("{:?}", config);

    if config.max_radix > config.bounds.radix_cap {
        warn!(
            "Maximum radix {} exceeds the cap of {}; stopping at {}",
            config.max_radix, config.bounds.radix_cap, config.bounds.radix_cap
        );
    }

    let evaluator = validate_binary_spec(&config.evaluator.to_string_lossy())
        .wrap_err("Cannot use the Slim Fly search executable")?;
    info!("Using evaluator: {:?}", evaluator);

    let stdout = io::stdout();
    let mut writer = RecordWriter::new(stdout.lock(), config.format);
    writer.write_header()?;

    for result in sweep::run(&config, EvaluatorOracle::new(evaluator)) {
        let record = result.wrap_err("Radix sweep aborted")?;
        writer.write_record(&record)?;
    }

    info!("Sweep completed");
    Ok(())
}

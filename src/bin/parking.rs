//! Parking Management command-line interface
//!
//! Runs a stream of parking commands against a single lot:
//! - read commands from a file or stdin
//! - write one result line per command to a file or stdout
//! - optionally report lot statistics and Prometheus metrics
//!
//! # Examples
//!
//! ```bash
//! # Run a command file, print results
//! parking run --input-file commands.txt
//!
//! # Write results to a file, with a pre-created lot of 6 slots
//! parking run --input-file commands.txt --output-file results.txt --capacity 6
//!
//! # Interactive, with statistics on exit
//! parking run --stats
//! ```

use clap::{Args, Parser, Subcommand};
use parking_management::config::AppConfig;
use parking_management::metrics::{export_metrics, init_metrics};
use parking_management::{CommandExecutor, ParkingLot};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Parking Management - nearest-slot parking lot simulator
#[derive(Parser, Debug)]
#[command(name = "parking")]
#[command(version = parking_management::VERSION)]
#[command(about = "Parking Management - nearest-slot parking lot simulator", long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a command stream
    Run(RunArgs),

    /// Show version
    Version,
}

/// Command stream arguments
#[derive(Args, Debug)]
struct RunArgs {
    /// Command file; stdin when omitted
    #[arg(short, long, alias = "input_file")]
    input_file: Option<PathBuf>,

    /// Result file; stdout when omitted
    #[arg(short, long, alias = "output_file")]
    output_file: Option<PathBuf>,

    /// Create a lot of this many slots before the first command
    #[arg(short, long)]
    capacity: Option<i64>,

    /// Print lot statistics as JSON on stderr when done
    #[arg(long)]
    stats: bool,

    /// Print Prometheus metrics on stderr when done
    #[arg(long)]
    metrics: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.directory = Some(dir.clone());
    }
    if cli.no_color {
        config.logging.ansi = false;
    }

    // Setup logging
    setup_logging(&config)?;

    match cli.command {
        Commands::Run(args) => run_command(config, args),
        Commands::Version => {
            println!("Parking Management {}", parking_management::VERSION);
            Ok(())
        }
    }
}

/// Setup logging on stderr, plus rolling files when a directory is configured
///
/// Stdout carries command results, so logs never go there.
fn setup_logging(config: &AppConfig) -> anyhow::Result<()> {
    let log_level = config
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let file_layer = match &config.logging.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "parking.log");
            Some(fmt::layer().with_writer(file_appender).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer(config))
        .with(file_layer)
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    Ok(())
}

fn console_layer<S>(config: &AppConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if config.logging.json {
        fmt::layer().with_writer(io::stderr).json().boxed()
    } else {
        fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(config.logging.ansi)
            .boxed()
    }
}

/// Run command - execute a command stream
fn run_command(config: AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let print_metrics = args.metrics || config.metrics.enabled;
    if print_metrics {
        init_metrics();
    }

    let mut executor = match args.capacity.or(config.lot.capacity) {
        Some(capacity) => CommandExecutor::with_lot(ParkingLot::new(capacity)?),
        None => CommandExecutor::new(),
    };

    let input: Box<dyn BufRead> = match &args.input_file {
        Some(path) => {
            info!(path = %path.display(), "Reading commands");
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match &args.output_file {
        Some(path) => {
            info!(path = %path.display(), "Writing results");
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(io::stdout().lock()),
    };

    let summary = executor.run(input, output)?;
    if summary.failed > 0 {
        error!(failed = summary.failed, "Some commands failed");
    }

    if args.stats {
        match executor.lot() {
            Some(lot) => eprintln!("{}", serde_json::to_string_pretty(&lot.stats())?),
            None => eprintln!("No parking lot was created"),
        }
    }

    if print_metrics {
        eprint!("{}", export_metrics()?);
    }

    Ok(())
}

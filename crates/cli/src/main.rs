//! Demand-paging simulator CLI.
//!
//! This binary drives the simulator core. It provides:
//! 1. **Run:** Simulate one configuration, rendering state after every reference.
//! 2. **Step:** Same as run, pausing for Enter between references.
//! 3. **Compare:** Run every algorithm (and both allocation modes) on one sequence.

mod render;

use std::error::Error as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use pagesim_core::common::{ConfigError, InvariantViolation, SimError};
use pagesim_core::config::{Algorithm, AllocationMode, Config, parse_sequence};
use pagesim_core::sim::{Simulator, simulate};

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    author,
    version,
    about = "Demand-paging virtual memory simulator",
    long_about = "Simulate page replacement (FIFO, OPTIMAL, CLOCK) under global or local frame allocation.\n\nExamples:\n  pagesim run -f 3 -s \"7 0 1 2 0 3 0 4\" -a fifo\n  pagesim run -f 4 -s 1,2,3,4,1,2,5 -a clock -m local -p 3 --step\n  pagesim compare -f 3 -s \"7 0 1 2 0 3 0 4\" -p 2\n  pagesim run -c scenario.json --json"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one configuration.
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// Pause for Enter after every reference.
        #[arg(long, conflicts_with_all = ["quiet", "json"])]
        step: bool,

        /// Print only the final summary.
        #[arg(short, long)]
        quiet: bool,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run every algorithm over the same sequence and compare fault counts.
    Compare {
        #[command(flatten)]
        config: ConfigArgs,

        /// Print the comparison as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Configuration sources. Flags override values from `--config`.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Total number of physical frames.
    #[arg(short, long)]
    frames: Option<usize>,

    /// Page references, separated by commas or spaces.
    #[arg(short, long)]
    sequence: Option<String>,

    /// Replacement algorithm: FIFO, OPTIMAL or CLOCK (or 1, 2, 3).
    #[arg(short, long, value_parser = parse_algorithm)]
    algorithm: Option<Algorithm>,

    /// Allocation mode: GLOBAL or LOCAL (or G, L).
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<AllocationMode>,

    /// Frames reserved for the process in LOCAL mode.
    #[arg(short, long)]
    partition: Option<usize>,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, ConfigError> {
    s.parse()
}

fn parse_mode(s: &str) -> Result<AllocationMode, ConfigError> {
    s.parse()
}

impl ConfigArgs {
    /// Merges the configuration file (if any) with command-line overrides.
    fn resolve(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::new(0, Vec::new(), Algorithm::default()),
        };
        if let Some(frames) = self.frames {
            config.total_frames = frames;
        }
        if let Some(text) = &self.sequence {
            config.sequence = parse_sequence(text)?;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(partition) = self.partition {
            config.partition_size = Some(partition);
        }
        if let Some(mode) = self.mode {
            config.allocation_mode = mode;
        }
        Ok(config)
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("output failed")]
    Io(#[from] io::Error),

    #[error("failed to encode report")]
    Json(#[from] serde_json::Error),
}

impl From<SimError> for CliError {
    fn from(e: SimError) -> Self {
        match e {
            SimError::Config(e) => Self::Config(e),
            SimError::Invariant(e) => Self::Invariant(e),
        }
    }
}

impl CliError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Invariant(_) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            step,
            quiet,
            json,
        } => cmd_run(&config, step, quiet, json),
        Commands::Compare { config, json } => cmd_compare(&config, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Simulates one configuration, rendering every step unless `quiet` or `json`.
fn cmd_run(args: &ConfigArgs, step: bool, quiet: bool, json: bool) -> Result<(), CliError> {
    let config = args.resolve()?;
    if config.allocation_mode == AllocationMode::Global && config.partition_size.is_some() {
        warn!("partition size is ignored in GLOBAL mode");
    }
    let mut sim = Simulator::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let report = sim.run()?;
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let stdin = io::stdin();
    let mut pause = String::new();
    while let Some(event) = sim.step()? {
        if quiet {
            continue;
        }
        let config = sim.config();
        render::state(
            &mut out,
            &config.sequence,
            config.allocation_mode,
            config.algorithm,
            &sim.snapshot(),
            &event,
        )?;
        if step && !sim.is_finished() {
            write!(out, "\nPress Enter for the next reference...")?;
            out.flush()?;
            pause.clear();
            if stdin.lock().read_line(&mut pause)? == 0 {
                debug!("stdin closed, continuing without pauses");
            }
        }
    }
    render::summary(&mut out, sim.stats())?;
    Ok(())
}

/// One row of the comparison table.
#[derive(Debug, Serialize)]
struct CompareRow {
    algorithm: Algorithm,
    allocation_mode: AllocationMode,
    frames: usize,
    faults: u64,
    fault_rate: Option<f64>,
}

/// Runs every algorithm, under both modes when a partition is configured.
fn cmd_compare(args: &ConfigArgs, json: bool) -> Result<(), CliError> {
    let base = args.resolve()?;
    let mut modes = vec![AllocationMode::Global];
    if base.partition_size.is_some() {
        modes.push(AllocationMode::Local);
    }

    let mut rows = Vec::new();
    for mode in modes {
        for algorithm in Algorithm::ALL {
            let config = Config {
                algorithm,
                allocation_mode: mode,
                ..base.clone()
            };
            let report = simulate(config)?;
            rows.push(CompareRow {
                algorithm,
                allocation_mode: mode,
                frames: report.allocated_frames,
                faults: report.stats.faults,
                fault_rate: report.fault_rate,
            });
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }
    render::sequence_line(&mut out, &base.sequence, usize::MAX)?;
    writeln!(out, "{:<9} {:<7} {:>6} {:>7} {:>8}", "ALGORITHM", "MODE", "FRAMES", "FAULTS", "RATE")?;
    for row in &rows {
        let rate = row
            .fault_rate
            .map_or_else(|| "-".to_string(), |r| format!("{r:.2}%"));
        writeln!(
            out,
            "{:<9} {:<7} {:>6} {:>7} {:>8}",
            row.algorithm.name(),
            row.allocation_mode.name(),
            row.frames,
            row.faults,
            rate
        )?;
    }
    Ok(())
}

//! Diffusion simulator CLI
//!
//! Spreads a sensed event through a grid sensor network with a random-walk
//! agent message and finds it again from a sink with a search message.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use diffusion_core::{EventId, GridBuilder};
use diffusion_logging::{ConsoleFormat, DiffusionSubscriberBuilder, LogConfig};
use diffusion_simulation::{SimConfig, TraceFormat, render_grid, scenarios};

#[derive(Parser)]
#[command(
    name = "diffusion-sim",
    about = "Directed diffusion simulation on a grid sensor network",
    version
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format (logs go to stderr)
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sense an event at a random place and search for it from a random sink
    Run {
        /// TOML config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of grid rows
        #[arg(long)]
        length: Option<usize>,

        /// Number of grid columns
        #[arg(long)]
        width: Option<usize>,

        /// Hop budget of each walk
        #[arg(long)]
        ttl: Option<u32>,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Event id to spread
        #[arg(short, long)]
        event: Option<u32>,

        /// Trace output format
        #[arg(short, long, value_enum)]
        trace: Option<TraceFormat>,
    },

    /// Print the grid layout
    Grid {
        /// Number of grid rows
        #[arg(long, default_value = "7")]
        length: usize,

        /// Number of grid columns
        #[arg(long, default_value = "7")]
        width: usize,
    },

    /// Run the deterministic 4x4 walkthrough
    Walkthrough,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::development()
    } else {
        LogConfig::default()
    };
    let console_format = match cli.log_format {
        LogFormat::Pretty if cli.verbose => ConsoleFormat::Pretty,
        LogFormat::Pretty => ConsoleFormat::Compact,
        LogFormat::Json => ConsoleFormat::Json,
    };
    let _guard = DiffusionSubscriberBuilder::new()
        .with_config(log_config)
        .with_console_format(console_format)
        .init()
        .context("Failed to initialize logging")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Run {
            config,
            length,
            width,
            ttl,
            seed,
            event,
            trace,
        } => {
            let mut sim_config = match config {
                Some(path) => SimConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => SimConfig::default(),
            };
            if let Some(length) = length {
                sim_config.grid.length = length;
            }
            if let Some(width) = width {
                sim_config.grid.width = width;
            }
            if let Some(ttl) = ttl {
                sim_config.protocol.ttl_max = ttl;
            }
            if seed.is_some() {
                sim_config.seed = seed;
            }
            if let Some(event) = event {
                sim_config.event_id = EventId(event);
            }
            if let Some(trace) = trace {
                sim_config.trace = trace;
            }
            debug!(config = ?sim_config, "Effective configuration");

            scenarios::run_random_scenario(sim_config, &mut out)
                .context("Simulation run failed")?;
        }
        Commands::Grid { length, width } => {
            let grid = GridBuilder::new(length, width)
                .build()
                .context("Invalid grid dimensions")?;
            writeln!(out, "{}", render_grid(&grid))?;
        }
        Commands::Walkthrough => {
            scenarios::run_walkthrough_scenario(&mut out)
                .context("Walkthrough failed")?;
        }
    }

    out.flush()?;
    Ok(())
}

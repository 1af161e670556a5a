//! topopt: command-line driver for SIMP topology optimization.
//!
//! Reads a JSON job describing a box-shaped design domain, its material,
//! load and supports, runs the optimizer and exports the thresholded part
//! as STL.
//!
//! # Logging
//!
//! Set `RUST_LOG` to control log output, or pass `-v`/`-vv`:
//! - `RUST_LOG=simp_optimizer=info` - progress every few iterations
//! - `RUST_LOG=simp_optimizer=debug` - every iteration and the bisection
//! - `RUST_LOG=voxel_mesh=debug` - export strategy details
//!
//! # Example
//!
//! ```bash
//! topopt run bracket.json -o bracket.stl
//! topopt --format json metrics bracket.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod job;
mod output;
mod report;

/// topopt - Minimum-compliance topology optimization of a box domain.
#[derive(Parser)]
#[command(name = "topopt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Include the final density field in JSON output
    #[arg(long, global = true)]
    density_field: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize, export the mesh and print the metrics
    Run {
        /// Job file (JSON)
        input: PathBuf,

        /// Output STL path; defaults to the scratch directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the geometry kernel and triangulate every voxel
        #[arg(long)]
        no_kernel: bool,
    },

    /// Optimize and print the metrics without writing a mesh
    Metrics {
        /// Job file (JSON)
        input: PathBuf,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins over -v
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "simp_optimizer=info,voxel_mesh=info,topopt=info",
            2 => "simp_optimizer=debug,voxel_mesh=debug,topopt=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Run {
            input,
            output,
            no_kernel,
        } => commands::run::run(input, output.as_deref(), *no_kernel, &cli),
        Commands::Metrics { input } => commands::metrics::run(input, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

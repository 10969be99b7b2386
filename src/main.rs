//! Lumen CLI - run, inspect, and sweep policy turns over snapshot files.

// Allow print in the CLI binary, and unwrap in tests
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Lumen - a greedy turn-policy engine for day/night resource games
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one decision turn over a snapshot file
    Turn {
        /// Snapshot JSON file
        #[arg(required = true)]
        snapshot: std::path::PathBuf,

        /// Policy config JSON file (defaults built in)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Validate a snapshot file and print a structural summary
    Check {
        /// Snapshot JSON file
        #[arg(required = true)]
        snapshot: std::path::PathBuf,
    },

    /// Evaluate every snapshot in a directory and aggregate statistics
    Eval {
        /// Directory of snapshot JSON files
        #[arg(required = true)]
        dir: std::path::PathBuf,

        /// Policy config JSON file (defaults built in)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::EvalFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays clean for action output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Turn {
            snapshot,
            config,
            format,
        } => cli::turn::execute(snapshot, config, format),

        Commands::Check { snapshot } => cli::check::execute(snapshot),

        Commands::Eval {
            dir,
            config,
            threads,
            format,
            progress,
        } => cli::eval::execute(dir, config, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

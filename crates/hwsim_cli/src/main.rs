//! hwsim CLI: the command-line interface for the hwsim circuit simulator.
//!
//! Provides `hwsim sim` for simulating a circuit description and printing
//! its traces, and `hwsim check` for validating a description without
//! running it.

#![warn(missing_docs)]

mod check;
mod pipeline;
mod sim;

use std::num::NonZeroUsize;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// hwsim: simulate boolean circuits cycle by cycle.
#[derive(Parser, Debug)]
#[command(name = "hwsim", version, about = "Boolean circuit simulator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `hwsim.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a circuit and print its traces.
    Sim(SimArgs),
    /// Parse and validate a circuit without simulating it.
    Check(CheckArgs),
}

/// Arguments for the `hwsim sim` subcommand.
#[derive(Parser, Debug)]
pub struct SimArgs {
    /// Circuit file (`.hw` source or `.json` serialized circuit).
    pub file: String,

    /// Output format for the traces.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write a VCD waveform to this path.
    #[arg(long)]
    pub vcd: Option<String>,

    /// Maximum nesting of user-function calls (at least 1).
    #[arg(long)]
    pub max_call_depth: Option<NonZeroUsize>,
}

/// Arguments for the `hwsim check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Circuit file (`.hw` source or `.json` serialized circuit).
    pub file: String,
}

/// Trace output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One `<bits> <name>` line per trace.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Sim(ref args) => sim::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

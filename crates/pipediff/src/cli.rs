//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "pipediff")]
#[command(about = "Differential write-back verification for a pipelined RV64 core")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a regression against a per-cycle expected trace
    Run {
        /// Recorded DUT port trace to replay
        #[arg(long, value_name = "FILE")]
        ports: PathBuf,

        /// Expected write-back trace (one record per cycle, X = no write)
        #[arg(long, value_name = "FILE")]
        expected: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        /// Stop at the first divergence instead of reporting every cycle
        #[arg(long)]
        stop_on_first: bool,
    },
    /// Compare a DUT run against a positional golden trace
    Cosim {
        /// Recorded DUT port trace to replay
        #[arg(long, value_name = "FILE")]
        ports: PathBuf,

        /// Golden trace (one hex value per committed write, in order)
        #[arg(long, value_name = "FILE")]
        golden: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Record a DUT run's write-back stream as a positional trace
    Record {
        /// Recorded DUT port trace to replay
        #[arg(long, value_name = "FILE")]
        ports: PathBuf,

        /// Output trace path
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Compare two positional trace files
    Diff {
        /// First trace (e.g. the DUT-side recording)
        #[arg(value_name = "FILE")]
        left: PathBuf,

        /// Second trace (e.g. the golden-model capture)
        #[arg(value_name = "FILE")]
        right: PathBuf,
    },
}

/// Options shared by the cycle-loop commands.
#[derive(clap::Args, Clone, Debug)]
pub struct RunArgs {
    /// Number of program cycles to run
    #[arg(long)]
    pub cycles: usize,

    /// Run identifier, used to name waveform output
    #[arg(long, default_value = "pipeline")]
    pub name: String,

    /// Write a VCD waveform of the observed ports
    #[arg(long)]
    pub wave: bool,

    /// Ticks to hold reset before the first program cycle
    #[arg(long, default_value = "2")]
    pub reset_cycles: u32,
}

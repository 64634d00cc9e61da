//! Command implementations.
//!
//! Each submodule handles one CLI command and returns a process exit code.

mod cosim;
mod diff;
mod record;
mod run;

use std::path::Path;

use tracing::error;

use pipediff::{CycleDriver, ReplayDevice, VcdSink};

use crate::cli::{Cli, Commands, EXIT_FAILURE, RunArgs};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Run {
            ports,
            expected,
            run,
            stop_on_first,
        } => run::cmd_run(ports, expected, run, *stop_on_first),
        Commands::Cosim { ports, golden, run } => cosim::cmd_cosim(ports, golden, run),
        Commands::Record { ports, out, run } => record::cmd_record(ports, out, run),
        Commands::Diff { left, right } => diff::cmd_diff(left, right),
    }
}

/// Build a cycle driver for a replayed port trace, attaching a waveform sink
/// when requested.
///
/// The sink destination is derived from the run name, matching the
/// `<name>_<command>_tb.vcd` convention. An unwritable sink is a setup
/// error, not a capture degradation: nothing has run yet.
fn build_driver(
    ports: &Path,
    args: &RunArgs,
    suffix: &str,
) -> Result<CycleDriver<ReplayDevice>, i32> {
    let dut = match ReplayDevice::from_path(ports) {
        Ok(dut) => dut,
        Err(err) => {
            error!("{err}");
            return Err(EXIT_FAILURE);
        }
    };
    let mut driver = CycleDriver::new(dut);
    if args.wave {
        let wave_path = format!("{}_{suffix}_tb.vcd", args.name);
        match VcdSink::create(Path::new(&wave_path), &args.name) {
            Ok(sink) => driver.set_wave(sink),
            Err(err) => {
                error!("could not open waveform sink {wave_path}: {err}");
                return Err(EXIT_FAILURE);
            }
        }
    }
    Ok(driver)
}

/// Close the driver's waveform sink; a close failure only costs the wave.
fn finish_driver(driver: CycleDriver<ReplayDevice>) {
    if let Err(err) = driver.finish() {
        tracing::warn!("could not close waveform sink: {err}");
    }
}

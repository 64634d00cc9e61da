//! DUT-side positional trace recording command.

use std::path::Path;

use tracing::{error, info};

use pipediff::{RunConfig, run_record};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, RunArgs};

use super::{build_driver, finish_driver};

pub fn cmd_record(ports: &Path, out: &Path, args: &RunArgs) -> i32 {
    let mut driver = match build_driver(ports, args, "cosim") {
        Ok(driver) => driver,
        Err(code) => return code,
    };

    let config = RunConfig {
        cycles: args.cycles,
        reset_cycles: args.reset_cycles,
        compare: pipediff::CompareConfig::default(),
    };
    match run_record(&mut driver, &config, out) {
        Ok(written) => {
            info!(
                "recorded {written} write-back values over {} cycles to {}",
                args.cycles,
                out.display()
            );
            finish_driver(driver);
            EXIT_SUCCESS
        }
        Err(err) => {
            error!("{err}");
            finish_driver(driver);
            EXIT_FAILURE
        }
    }
}

//! Positional golden-trace comparison command.

use std::path::Path;

use tracing::{error, info, warn};

use pipediff::{RunConfig, load_trace, report, run_golden};

use crate::cli::{EXIT_FAILURE, RunArgs};

use super::{build_driver, finish_driver};

pub fn cmd_cosim(ports: &Path, golden_path: &Path, args: &RunArgs) -> i32 {
    let golden = match load_trace(golden_path) {
        Ok(golden) => golden,
        Err(err) => {
            error!("{err}");
            return EXIT_FAILURE;
        }
    };
    let mut driver = match build_driver(ports, args, "cosim") {
        Ok(driver) => driver,
        Err(code) => return code,
    };

    info!(
        "co-simulating {} for {} cycles against {} ({} golden writes)",
        args.name,
        args.cycles,
        golden_path.display(),
        golden.len()
    );
    let config = RunConfig {
        cycles: args.cycles,
        reset_cycles: args.reset_cycles,
        compare: pipediff::CompareConfig::default(),
    };
    let outcome = run_golden(&mut driver, golden, &config);
    report::print_report(&args.name, &outcome.rows, outcome.passed);
    if outcome.leftover > 0 {
        warn!(
            "{} golden entries were never consumed; DUT and golden run lengths differ",
            outcome.leftover
        );
    }
    finish_driver(driver);
    outcome.exit_code()
}

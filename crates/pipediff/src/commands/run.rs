//! Expected-trace regression command.

use std::path::Path;

use tracing::{error, info};

use pipediff::{CompareConfig, RunConfig, load_expected, report, run_expected};

use crate::cli::{EXIT_FAILURE, RunArgs};

use super::{build_driver, finish_driver};

pub fn cmd_run(ports: &Path, expected_path: &Path, args: &RunArgs, stop_on_first: bool) -> i32 {
    let expected = match load_expected(expected_path, args.cycles) {
        Ok(expected) => expected,
        Err(err) => {
            error!("{err}");
            return EXIT_FAILURE;
        }
    };
    let mut driver = match build_driver(ports, args, "pipeline") {
        Ok(driver) => driver,
        Err(code) => return code,
    };

    info!(
        "running {} for {} cycles against {}",
        args.name,
        args.cycles,
        expected_path.display()
    );
    let config = RunConfig {
        cycles: args.cycles,
        reset_cycles: args.reset_cycles,
        compare: CompareConfig { stop_on_first },
    };
    let outcome = run_expected(&mut driver, &expected, &config);
    report::print_report(&args.name, &outcome.rows, outcome.passed);
    finish_driver(driver);
    outcome.exit_code()
}

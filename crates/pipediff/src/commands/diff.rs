//! Offline positional trace comparison command.

use std::path::Path;

use console::style;
use tracing::{error, warn};

use pipediff::{diff_traces, load_trace};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};

pub fn cmd_diff(left_path: &Path, right_path: &Path) -> i32 {
    let (left, right) = match (load_trace(left_path), load_trace(right_path)) {
        (Ok(left), Ok(right)) => (left, right),
        (Err(err), _) | (_, Err(err)) => {
            error!("{err}");
            return EXIT_FAILURE;
        }
    };

    let mismatches = diff_traces(&left, &right);
    for m in &mismatches {
        println!(
            "mismatch at entry {}: {} {:016x} vs {} {:016x}",
            m.index,
            left_path.display(),
            m.left,
            right_path.display(),
            m.right
        );
    }
    if left.len() != right.len() {
        warn!(
            "traces have different lengths ({} vs {}); compared the common prefix",
            left.len(),
            right.len()
        );
    }

    if mismatches.is_empty() {
        println!(
            "{}: traces match over {} entries",
            style("PASSED").green().bold(),
            left.len().min(right.len())
        );
        EXIT_SUCCESS
    } else {
        println!(
            "{}: {} mismatched entries",
            style("FAILED").red().bold(),
            mismatches.len()
        );
        EXIT_FAILURE
    }
}

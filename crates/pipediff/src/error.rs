use std::path::PathBuf;

use thiserror::Error;

/// Harness setup errors.
///
/// A setup failure aborts the run before any cycle executes. Divergences
/// found by the comparator are never errors; they come back as verdicts.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("DUT error: {0}")]
    Dut(#[from] pipediff_dut::DutError),
    #[error("could not open trace {path}: {source}")]
    TraceOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}:{line}: malformed record '{text}'")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        text: String,
    },
    #[error("{path}: {got} expected-value records, need at least {need}")]
    TooFewRecords {
        path: PathBuf,
        got: usize,
        need: usize,
    },
}

pub type Result<T> = std::result::Result<T, HarnessError>;

//! Expected write-back trace loader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::{HarnessError, Result};

/// What the expected trace says about one cycle.
///
/// An explicit variant rather than an in-band sentinel: a program can
/// legitimately write any 64-bit pattern, including all-ones, so "no write"
/// must not share the value space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteExpectation {
    /// No architectural write this cycle.
    NoWrite,
    /// A write of exactly this value.
    Value(u64),
}

/// Load a per-cycle expected trace.
///
/// One record per line: the case-insensitive token `X` (no write expected)
/// or a hex literal (`0x` prefix optional). Blank lines and `#` comments are
/// skipped. The file must contain at least `cycles` records; surplus records
/// are dropped with a warning and never consulted. Values get no semantic
/// validation.
pub fn load_expected(path: &Path, cycles: usize) -> Result<Vec<WriteExpectation>> {
    let file = File::open(path).map_err(|source| HarnessError::TraceOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let entry = parse_record(text).ok_or_else(|| HarnessError::MalformedRecord {
            path: path.to_path_buf(),
            line: idx + 1,
            text: text.to_string(),
        })?;
        entries.push(entry);
    }
    if entries.len() < cycles {
        return Err(HarnessError::TooFewRecords {
            path: path.to_path_buf(),
            got: entries.len(),
            need: cycles,
        });
    }
    if entries.len() > cycles {
        warn!(
            "{}: {} records for {cycles} cycles, ignoring the tail",
            path.display(),
            entries.len(),
        );
        entries.truncate(cycles);
    }
    Ok(entries)
}

fn parse_record(text: &str) -> Option<WriteExpectation> {
    if text.eq_ignore_ascii_case("x") {
        return Some(WriteExpectation::NoWrite);
    }
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u64::from_str_radix(digits, 16)
        .ok()
        .map(WriteExpectation::Value)
}

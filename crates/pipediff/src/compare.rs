//! Per-cycle write-back comparison.

use std::fmt;

use crate::expected::WriteExpectation;

/// One cycle's observed write-back, as sampled by the cycle driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleRecord {
    /// Program cycle index, counted from the end of reset.
    pub cycle: usize,
    /// Whether the DUT committed a register write this cycle.
    pub write_enable: bool,
    /// Value on the write-data port. Meaningful only when `write_enable`.
    pub write_value: u64,
}

/// Per-cycle comparison verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Expected write observed with the expected value.
    Pass,
    /// No write expected, none observed.
    PassNoWrite,
    /// Write observed with the wrong value.
    ValueMismatch,
    /// Write observed on a cycle that expected none.
    SpuriousWrite,
    /// Expected write never committed (or the golden trace ran out).
    MissingWrite,
}

impl Verdict {
    /// Whether this verdict counts toward an overall pass.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass | Self::PassNoWrite)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::PassNoWrite => write!(f, "PASS (no write)"),
            Self::ValueMismatch => write!(f, "FAIL (value mismatch)"),
            Self::SpuriousWrite => write!(f, "FAIL (spurious write)"),
            Self::MissingWrite => write!(f, "FAIL (missing write)"),
        }
    }
}

/// Divergence-handling discipline.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareConfig {
    /// Stop the cycle loop at the first non-PASS verdict instead of
    /// accumulating a full per-cycle report.
    pub stop_on_first: bool,
}

/// Classify one cycle against its expected entry.
///
/// The comparator only reads sampled outputs; it never touches the DUT.
#[must_use]
pub const fn classify(expected: WriteExpectation, record: CycleRecord) -> Verdict {
    match (expected, record.write_enable) {
        (WriteExpectation::NoWrite, false) => Verdict::PassNoWrite,
        (WriteExpectation::NoWrite, true) => Verdict::SpuriousWrite,
        (WriteExpectation::Value(_), false) => Verdict::MissingWrite,
        (WriteExpectation::Value(v), true) => {
            if record.write_value == v {
                Verdict::Pass
            } else {
                Verdict::ValueMismatch
            }
        }
    }
}

/// Positional cursor over a golden trace.
///
/// Golden lines are per committed write, not per cycle, so the cursor
/// advances only on write-enabled cycles and compares against the next
/// unconsumed value. Exhaustion while the DUT still writes is a
/// missing-write failure (the golden ran out of entries); leftover values
/// after the run end are the caller's length-mismatch warning, not a
/// per-cycle failure. Only the value sequence is validated, not cycle
/// timing.
#[derive(Debug)]
pub struct GoldenCursor {
    values: Vec<u64>,
    pos: usize,
}

impl GoldenCursor {
    #[must_use]
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, pos: 0 }
    }

    /// Classify one cycle, consuming a golden value on write-enabled cycles.
    pub fn classify(&mut self, record: CycleRecord) -> Verdict {
        if !record.write_enable {
            return Verdict::PassNoWrite;
        }
        match self.values.get(self.pos) {
            None => Verdict::MissingWrite,
            Some(&expected) => {
                self.pos += 1;
                if record.write_value == expected {
                    Verdict::Pass
                } else {
                    Verdict::ValueMismatch
                }
            }
        }
    }

    /// The value the cursor would compare against next.
    #[must_use]
    pub fn peek(&self) -> Option<u64> {
        self.values.get(self.pos).copied()
    }

    /// Number of golden values not consumed by the run.
    #[must_use]
    pub fn leftover(&self) -> usize {
        self.values.len() - self.pos
    }
}

/// One mismatched index from an offline trace comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceMismatch {
    pub index: usize,
    pub left: u64,
    pub right: u64,
}

/// Compare two positional traces index by index.
///
/// Compares up to the shorter length; a length difference is reported by the
/// caller as a warning, mirroring the leftover rule of [`GoldenCursor`].
#[must_use]
pub fn diff_traces(left: &[u64], right: &[u64]) -> Vec<TraceMismatch> {
    left.iter()
        .zip(right)
        .enumerate()
        .filter(|(_, (l, r))| l != r)
        .map(|(index, (&left, &right))| TraceMismatch { index, left, right })
        .collect()
}

//! Regression driver: reset, the cycle loop, and outcome aggregation.
//!
//! Each run is strictly tick-then-compare: cycle *i*'s comparison happens
//! after cycle *i*'s tick and before cycle *i+1*'s tick. Divergences are
//! data, never control flow; only setup failures abort a run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use pipediff_dut::{CycleDriver, SyncDevice};

use crate::compare::{CompareConfig, CycleRecord, GoldenCursor, classify};
use crate::error::{HarnessError, Result};
use crate::expected::WriteExpectation;
use crate::report::CycleReport;

/// Run parameters shared by both comparison disciplines.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Number of program cycles to execute after reset.
    pub cycles: usize,
    /// Ticks to hold reset asserted before the first program cycle.
    pub reset_cycles: u32,
    /// Divergence-handling discipline.
    pub compare: CompareConfig,
}

impl RunConfig {
    /// Config with the harness defaults: two reset ticks, accumulate-and-report.
    #[must_use]
    pub fn new(cycles: usize) -> Self {
        Self {
            cycles,
            reset_cycles: 2,
            compare: CompareConfig::default(),
        }
    }
}

/// Outcome of one regression run.
#[derive(Debug)]
pub struct RunOutcome {
    /// One row per executed cycle (fewer than configured when the
    /// stop-on-first discipline ended the loop early).
    pub rows: Vec<CycleReport>,
    /// True iff every executed cycle was PASS-class.
    pub passed: bool,
    /// Golden values never consumed (positional discipline only).
    pub leftover: usize,
}

impl RunOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.passed { 0 } else { 1 }
    }
}

fn to_record(cycle: usize, ports: pipediff_dut::PortSample) -> CycleRecord {
    CycleRecord {
        cycle,
        write_enable: ports.write_enable,
        write_value: ports.write_data,
    }
}

/// Compare a DUT run against a pre-authored per-cycle expected trace.
///
/// `expected` must hold at least `config.cycles` entries; the loader
/// guarantees this for traces it returns.
pub fn run_expected<D: SyncDevice>(
    driver: &mut CycleDriver<D>,
    expected: &[WriteExpectation],
    config: &RunConfig,
) -> RunOutcome {
    driver.reset(config.reset_cycles);
    let mut rows = Vec::with_capacity(config.cycles);
    let mut passed = true;
    for cycle in 0..config.cycles {
        let ports = driver.tick();
        let expectation = expected[cycle];
        let verdict = classify(expectation, to_record(cycle, ports));
        rows.push(CycleReport {
            cycle,
            ports,
            expected: Some(expectation),
            verdict,
        });
        if !verdict.is_pass() {
            passed = false;
            if config.compare.stop_on_first {
                break;
            }
        }
    }
    RunOutcome {
        rows,
        passed,
        leftover: 0,
    }
}

/// Compare a DUT run against a positional golden trace.
///
/// The cursor consumes one golden value per write-enabled cycle; unconsumed
/// values at the end of the run are a length-mismatch warning, not a
/// failure.
pub fn run_golden<D: SyncDevice>(
    driver: &mut CycleDriver<D>,
    golden: Vec<u64>,
    config: &RunConfig,
) -> RunOutcome {
    driver.reset(config.reset_cycles);
    let mut cursor = GoldenCursor::new(golden);
    let mut rows = Vec::with_capacity(config.cycles);
    let mut passed = true;
    for cycle in 0..config.cycles {
        let ports = driver.tick();
        let expected = if ports.write_enable {
            cursor.peek().map(WriteExpectation::Value)
        } else {
            Some(WriteExpectation::NoWrite)
        };
        let verdict = cursor.classify(to_record(cycle, ports));
        rows.push(CycleReport {
            cycle,
            ports,
            expected,
            verdict,
        });
        if !verdict.is_pass() {
            passed = false;
            if config.compare.stop_on_first {
                break;
            }
        }
    }
    let leftover = cursor.leftover();
    if leftover > 0 {
        warn!(
            "golden trace has {leftover} unconsumed entries after {} cycles",
            config.cycles
        );
    }
    RunOutcome {
        rows,
        passed,
        leftover,
    }
}

/// Record a DUT run's write-back stream as a positional trace.
///
/// The generation half of a two-process co-simulation: each write-enabled
/// cycle appends one line in golden format. Returns the number of lines
/// written.
pub fn run_record<D: SyncDevice>(
    driver: &mut CycleDriver<D>,
    config: &RunConfig,
    out: &Path,
) -> Result<usize> {
    let file = File::create(out).map_err(|source| HarnessError::TraceOpen {
        path: out.to_path_buf(),
        source,
    })?;
    let mut w = BufWriter::new(file);
    driver.reset(config.reset_cycles);
    let mut written = 0;
    for _ in 0..config.cycles {
        let ports = driver.tick();
        if ports.write_enable {
            writeln!(w, "{:016x}", ports.write_data)?;
            written += 1;
        }
    }
    w.flush()?;
    Ok(written)
}

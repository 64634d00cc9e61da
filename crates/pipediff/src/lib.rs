//! pipediff - differential write-back verification for a pipelined RV64 core.
//!
//! Two independent engines execute the same program: a cycle-accurate
//! pipeline model driven through the [`pipediff_dut`] boundary, and an
//! instruction-level reference simulator that reports committed register
//! writes through [`RegWriteListener`]. Neither engine is trusted alone;
//! correctness is established by comparing the write-back streams the two
//! produce.
//!
//! # Example
//!
//! ```ignore
//! use pipediff::{CycleDriver, ReplayDevice, RunConfig, load_expected, run_expected};
//!
//! let expected = load_expected("expected.txt".as_ref(), 32)?;
//! let dut = ReplayDevice::from_path("dut.ports".as_ref())?;
//! let mut driver = CycleDriver::new(dut);
//! let outcome = run_expected(&mut driver, &expected, &RunConfig::new(32));
//! std::process::exit(outcome.exit_code());
//! ```

pub mod compare;
pub mod error;
pub mod expected;
pub mod golden;
pub mod regression;
pub mod report;

pub use compare::{
    CompareConfig, CycleRecord, GoldenCursor, TraceMismatch, Verdict, classify, diff_traces,
};
pub use error::{HarnessError, Result};
pub use expected::{WriteExpectation, load_expected};
pub use golden::{GoldenTraceWriter, RegWriteListener, load_trace};
pub use regression::{RunConfig, RunOutcome, run_expected, run_golden, run_record};
pub use report::CycleReport;

// Re-export the DUT boundary.
pub use pipediff_dut::{CycleDriver, DutError, PortSample, ReplayDevice, SyncDevice, VcdSink};

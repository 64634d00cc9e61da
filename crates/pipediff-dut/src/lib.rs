//! DUT boundary for the pipediff harness.
//!
//! Defines the synchronous-device interface the harness drives, the cycle
//! driver that owns the clock/reset protocol and simulated time, a VCD
//! waveform sink for the observed ports, and a replay device that stands in
//! for a verilated pipeline model in tests and CLI runs.

use std::path::PathBuf;

use thiserror::Error;

mod device;
pub mod driver;
pub mod replay;
pub mod wave;

pub use device::{PortSample, SyncDevice};
pub use driver::CycleDriver;
pub use replay::ReplayDevice;
pub use wave::VcdSink;

/// DUT boundary errors.
#[derive(Error, Debug)]
pub enum DutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not open port trace {path}: {source}")]
    PortTraceOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}:{line}: malformed port record '{text}'")]
    MalformedPortRecord {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

pub type Result<T> = std::result::Result<T, DutError>;

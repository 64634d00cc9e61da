//! Golden-model write-back capture and positional trace IO.
//!
//! The reference simulator reports committed register writes through
//! [`RegWriteListener`]; [`GoldenTraceWriter`] serializes them into a
//! positional trace of one fixed-width hex value per line, in commit order.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::error;

use crate::error::{HarnessError, Result};

/// Register-write notification from the reference engine.
///
/// Invoked synchronously once per committed architectural register write,
/// after the write has taken effect.
pub trait RegWriteListener {
    fn on_reg_write(&mut self, reg: u8, value: u64);
}

/// Capture adapter: records committed writes as a positional golden trace.
///
/// The destination path is resolved once at construction and the file is
/// opened in truncate mode on the first event; later events append through
/// the same handle. Writes to register 0 are architecturally discarded and
/// never recorded. If the destination cannot be opened the adapter logs one
/// diagnostic and drops every subsequent event; a partial golden run is
/// still useful for inspection, so this is not a fatal abort.
pub struct GoldenTraceWriter {
    path: PathBuf,
    sink: SinkState,
}

enum SinkState {
    Unopened,
    Open(BufWriter<File>),
    Failed,
}

impl GoldenTraceWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sink: SinkState::Unopened,
        }
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            SinkState::Open(w) => w.flush(),
            SinkState::Unopened | SinkState::Failed => Ok(()),
        }
    }

    fn sink(&mut self) -> Option<&mut BufWriter<File>> {
        if matches!(self.sink, SinkState::Unopened) {
            self.sink = match File::create(&self.path) {
                Ok(file) => SinkState::Open(BufWriter::new(file)),
                Err(err) => {
                    error!(
                        "could not open golden trace {}: {err}; dropping capture",
                        self.path.display()
                    );
                    SinkState::Failed
                }
            };
        }
        match &mut self.sink {
            SinkState::Open(w) => Some(w),
            SinkState::Unopened | SinkState::Failed => None,
        }
    }
}

impl RegWriteListener for GoldenTraceWriter {
    fn on_reg_write(&mut self, reg: u8, value: u64) {
        if reg == 0 {
            return;
        }
        let Some(sink) = self.sink() else {
            return;
        };
        if let Err(err) = writeln!(sink, "{value:016x}") {
            error!("golden trace write failed: {err}; dropping capture");
            self.sink = SinkState::Failed;
        }
    }
}

/// Load a positional trace: one hex value per line, in commit order.
///
/// Blank lines and `#` comments are skipped; anything else that does not
/// parse as hex is fatal with the offending line number.
pub fn load_trace(path: &Path) -> Result<Vec<u64>> {
    let file = File::open(path).map_err(|source| HarnessError::TraceOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let value =
            u64::from_str_radix(digits, 16).map_err(|_| HarnessError::MalformedRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                text: text.to_string(),
            })?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_writer_skips_zero_register() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golden.txt");
        let mut writer = GoldenTraceWriter::new(&path);
        writer.on_reg_write(0, 0xdead);
        writer.on_reg_write(1, 0xa);
        writer.on_reg_write(0, 0xbeef);
        writer.on_reg_write(31, 0x5);
        writer.flush().unwrap();

        let out = std::fs::read_to_string(&path).unwrap();
        assert_eq!(out, "000000000000000a\n0000000000000005\n");
    }

    #[test]
    fn test_writer_truncates_on_first_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golden.txt");
        std::fs::write(&path, "stale contents\n").unwrap();

        let mut writer = GoldenTraceWriter::new(&path);
        writer.on_reg_write(2, 0x1);
        writer.flush().unwrap();

        let out = std::fs::read_to_string(&path).unwrap();
        assert_eq!(out, "0000000000000001\n");
    }

    #[test]
    fn test_writer_without_events_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golden.txt");
        let mut writer = GoldenTraceWriter::new(&path);
        writer.flush().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_writer_degrades_when_unopenable() {
        let mut writer = GoldenTraceWriter::new("/nonexistent/dir/golden.txt");
        // Must not panic or error out; events are dropped.
        writer.on_reg_write(1, 0x1);
        writer.on_reg_write(2, 0x2);
        writer.flush().unwrap();
    }

    #[test]
    fn test_load_trace_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golden.txt");
        let mut writer = GoldenTraceWriter::new(&path);
        for (reg, value) in [(1u8, 0xau64), (0, 0xbad), (5, u64::MAX)] {
            writer.on_reg_write(reg, value);
        }
        writer.flush().unwrap();

        let values = load_trace(&path).unwrap();
        assert_eq!(values, vec![0xa, u64::MAX]);
    }

    #[test]
    fn test_load_trace_malformed_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "000000000000000a").unwrap();
        writeln!(file, "oops").unwrap();
        let err = load_trace(file.path()).unwrap_err();
        match err {
            HarnessError::MalformedRecord { line, text, .. } => {
                assert_eq!(line, 2);
                assert_eq!(text, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

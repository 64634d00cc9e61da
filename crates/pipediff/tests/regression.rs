//! End-to-end regression harness tests over real trace files.

use std::io::Write;

use pipediff::{
    CycleDriver, HarnessError, PortSample, RegWriteListener, ReplayDevice, RunConfig, Verdict,
    load_expected, load_trace, run_expected, run_golden,
};

fn ports(write_enable: bool, write_data: u64) -> PortSample {
    PortSample {
        pc: 0x8000_0000,
        instr: 0x0000_0093,
        write_enable,
        write_data,
    }
}

fn write_lines(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[test]
fn expected_file_run_passes() {
    let expected_file = write_lines(&["a", "X", "5"]);
    let expected = load_expected(expected_file.path(), 3).unwrap();

    let dut = ReplayDevice::from_records(vec![
        ports(true, 0xa),
        ports(false, 0),
        ports(true, 0x5),
    ]);
    let mut driver = CycleDriver::new(dut);
    let outcome = run_expected(&mut driver, &expected, &RunConfig::new(3));

    let verdicts: Vec<_> = outcome.rows.iter().map(|r| r.verdict).collect();
    assert_eq!(
        verdicts,
        vec![Verdict::Pass, Verdict::PassNoWrite, Verdict::Pass]
    );
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn expected_file_run_flags_spurious_write() {
    let expected_file = write_lines(&["a", "X", "5"]);
    let expected = load_expected(expected_file.path(), 3).unwrap();

    let dut = ReplayDevice::from_records(vec![
        ports(true, 0xa),
        ports(true, 0x1),
        ports(true, 0x5),
    ]);
    let mut driver = CycleDriver::new(dut);
    let outcome = run_expected(&mut driver, &expected, &RunConfig::new(3));

    let verdicts: Vec<_> = outcome.rows.iter().map(|r| r.verdict).collect();
    assert_eq!(
        verdicts,
        vec![Verdict::Pass, Verdict::SpuriousWrite, Verdict::Pass]
    );
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn short_expected_file_is_a_setup_error() {
    let expected_file = write_lines(&["a", "5"]);
    let err = load_expected(expected_file.path(), 3).unwrap_err();
    assert!(matches!(err, HarnessError::TooFewRecords { .. }));
}

/// A fake reference engine: commits a scripted write sequence through the
/// registered listener.
struct ScriptedEngine {
    writes: Vec<(u8, u64)>,
}

impl ScriptedEngine {
    fn run(&self, listener: &mut dyn RegWriteListener) {
        for &(reg, value) in &self.writes {
            listener.on_reg_write(reg, value);
        }
    }
}

#[test]
fn golden_capture_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let golden_path = dir.path().join("golden.txt");

    // Reference run: x0 writes are architecturally discarded.
    let engine = ScriptedEngine {
        writes: vec![(1, 0xa), (0, 0xdead), (2, 0x5), (3, u64::MAX)],
    };
    let mut capture = pipediff::GoldenTraceWriter::new(&golden_path);
    engine.run(&mut capture);
    capture.flush().unwrap();

    let golden = load_trace(&golden_path).unwrap();
    assert_eq!(golden.len(), 3);

    // A DUT that commits the same sequence, with pipeline idle cycles in
    // between, diverges nowhere and consumes the whole trace.
    let dut = ReplayDevice::from_records(vec![
        ports(false, 0),
        ports(true, 0xa),
        ports(false, 0),
        ports(true, 0x5),
        ports(true, u64::MAX),
    ]);
    let mut driver = CycleDriver::new(dut);
    let outcome = run_golden(&mut driver, golden, &RunConfig::new(5));
    assert!(outcome.passed);
    assert_eq!(outcome.leftover, 0);
}

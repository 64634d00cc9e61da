//! Per-cycle regression report rendering.

use console::style;
use pipediff_dut::PortSample;

use crate::compare::Verdict;
use crate::expected::WriteExpectation;

/// One buffered row of the per-cycle report.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub cycle: usize,
    /// DUT outputs sampled after the cycle's rising edge.
    pub ports: PortSample,
    /// Expected entry for the cycle. `None` when the golden trace was
    /// already exhausted.
    pub expected: Option<WriteExpectation>,
    pub verdict: Verdict,
}

fn expected_cell(expected: Option<WriteExpectation>) -> String {
    match expected {
        Some(WriteExpectation::Value(v)) => format!("{v:016x}"),
        Some(WriteExpectation::NoWrite) => "X (no write)".to_string(),
        None => "(exhausted)".to_string(),
    }
}

/// Render one row of the fixed-width table.
#[must_use]
pub fn render_row(row: &CycleReport) -> String {
    format!(
        "{:>5} | {:016x} | {:08x} | {:>2} | {:016x} | {:<16} | {}",
        row.cycle,
        row.ports.pc,
        row.ports.instr,
        u8::from(row.ports.write_enable),
        row.ports.write_data,
        expected_cell(row.expected),
        row.verdict,
    )
}

/// Print the per-cycle table and the run trailer.
pub fn print_report(name: &str, rows: &[CycleReport], passed: bool) {
    println!("Cycle | PC               | Instr    | WE | Got              | Expected         | Status");
    println!("------|------------------|----------|----|------------------|------------------|-------");
    for row in rows {
        let line = render_row(row);
        if row.verdict.is_pass() {
            println!("{line}");
        } else {
            println!("{}", style(line).red());
        }
    }
    let failed = rows.iter().filter(|r| !r.verdict.is_pass()).count();
    println!();
    if passed {
        println!(
            "{} {name}: all {} cycles passed",
            style("PASSED").green().bold(),
            rows.len()
        );
    } else {
        println!(
            "{} {name}: {failed} of {} reported cycles diverged",
            style("FAILED").red().bold(),
            rows.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_row_formats_fields() {
        let row = CycleReport {
            cycle: 7,
            ports: PortSample {
                pc: 0x80000000,
                instr: 0x0000_0093,
                write_enable: true,
                write_data: 0xa,
            },
            expected: Some(WriteExpectation::Value(0xa)),
            verdict: Verdict::Pass,
        };
        let line = render_row(&row);
        assert!(line.contains("    7 |"));
        assert!(line.contains("0000000080000000"));
        assert!(line.contains("00000093"));
        assert!(line.contains("000000000000000a"));
        assert!(line.ends_with("PASS"));
    }

    #[test]
    fn test_render_row_no_write_cell() {
        let row = CycleReport {
            cycle: 0,
            ports: PortSample::default(),
            expected: Some(WriteExpectation::NoWrite),
            verdict: Verdict::PassNoWrite,
        };
        assert!(render_row(&row).contains("X (no write)"));
    }
}

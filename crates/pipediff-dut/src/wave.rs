//! Minimal VCD waveform sink for the observed DUT ports.
//!
//! Records only the signals the harness can see: clk, rst, pc, instr,
//! write-enable and write-data. Value changes are emitted per half-tick
//! timestamp; since the clock toggles every delta there is a `#<time>` stamp
//! for every dump.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::device::PortSample;

const ID_CLK: char = '!';
const ID_RST: char = '"';
const ID_PC: char = '#';
const ID_INSTR: char = '$';
const ID_WE: char = '%';
const ID_WD: char = '&';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SignalState {
    clk: bool,
    rst: bool,
    ports: PortSample,
}

/// Buffered VCD writer.
pub struct VcdSink {
    w: BufWriter<File>,
    last: Option<SignalState>,
}

impl VcdSink {
    /// Create the VCD file and write its header, with one scope named after
    /// the run.
    pub fn create(path: &Path, scope: &str) -> io::Result<Self> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(w, "$timescale 1ns $end")?;
        writeln!(w, "$scope module {scope} $end")?;
        writeln!(w, "$var wire 1 {ID_CLK} clk $end")?;
        writeln!(w, "$var wire 1 {ID_RST} rst $end")?;
        writeln!(w, "$var wire 64 {ID_PC} pc $end")?;
        writeln!(w, "$var wire 32 {ID_INSTR} instr $end")?;
        writeln!(w, "$var wire 1 {ID_WE} we $end")?;
        writeln!(w, "$var wire 64 {ID_WD} wd $end")?;
        writeln!(w, "$upscope $end")?;
        writeln!(w, "$enddefinitions $end")?;
        Ok(Self { w, last: None })
    }

    /// Append one sample point. Only changed signals are written after the
    /// initial `$dumpvars` block.
    pub fn dump(
        &mut self,
        time: u64,
        clk: bool,
        rst: bool,
        ports: &PortSample,
    ) -> io::Result<()> {
        let next = SignalState {
            clk,
            rst,
            ports: *ports,
        };
        writeln!(self.w, "#{time}")?;
        match self.last {
            None => {
                writeln!(self.w, "$dumpvars")?;
                self.write_scalar(ID_CLK, next.clk)?;
                self.write_scalar(ID_RST, next.rst)?;
                self.write_vector(ID_PC, next.ports.pc)?;
                self.write_vector(ID_INSTR, u64::from(next.ports.instr))?;
                self.write_scalar(ID_WE, next.ports.write_enable)?;
                self.write_vector(ID_WD, next.ports.write_data)?;
                writeln!(self.w, "$end")?;
            }
            Some(last) => {
                if next.clk != last.clk {
                    self.write_scalar(ID_CLK, next.clk)?;
                }
                if next.rst != last.rst {
                    self.write_scalar(ID_RST, next.rst)?;
                }
                if next.ports.pc != last.ports.pc {
                    self.write_vector(ID_PC, next.ports.pc)?;
                }
                if next.ports.instr != last.ports.instr {
                    self.write_vector(ID_INSTR, u64::from(next.ports.instr))?;
                }
                if next.ports.write_enable != last.ports.write_enable {
                    self.write_scalar(ID_WE, next.ports.write_enable)?;
                }
                if next.ports.write_data != last.ports.write_data {
                    self.write_vector(ID_WD, next.ports.write_data)?;
                }
            }
        }
        self.last = Some(next);
        Ok(())
    }

    /// Flush and close the sink.
    pub fn finish(mut self) -> io::Result<()> {
        self.w.flush()
    }

    fn write_scalar(&mut self, id: char, value: bool) -> io::Result<()> {
        writeln!(self.w, "{}{id}", u8::from(value))
    }

    fn write_vector(&mut self, id: char, value: u64) -> io::Result<()> {
        writeln!(self.w, "b{value:b} {id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_dumpvars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tb.vcd");
        let mut sink = VcdSink::create(&path, "pipeline_tb").unwrap();
        let ports = PortSample {
            pc: 0x80,
            instr: 0x13,
            write_enable: false,
            write_data: 0,
        };
        sink.dump(0, false, true, &ports).unwrap();
        sink.dump(1, true, true, &ports).unwrap();
        sink.finish().unwrap();

        let out = std::fs::read_to_string(&path).unwrap();
        assert!(out.contains("$timescale 1ns $end"));
        assert!(out.contains("$scope module pipeline_tb $end"));
        assert!(out.contains("$var wire 64 # pc $end"));
        assert!(out.contains("$dumpvars"));
        assert!(out.contains("#0\n"));
        assert!(out.contains("#1\n"));
    }

    #[test]
    fn test_only_changes_after_first_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tb.vcd");
        let mut sink = VcdSink::create(&path, "tb").unwrap();
        let ports = PortSample::default();
        sink.dump(0, false, false, &ports).unwrap();
        sink.dump(1, true, false, &ports).unwrap();
        sink.finish().unwrap();

        let out = std::fs::read_to_string(&path).unwrap();
        let tail = out.split("#1").nth(1).unwrap();
        assert!(tail.contains("1!"));
        // Unchanged signals are not re-emitted.
        assert!(!tail.contains('"'));
        assert!(!tail.contains("b0 #"));
    }
}

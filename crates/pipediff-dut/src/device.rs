//! The synchronous device interface.

/// Output ports observed on the DUT after an eval.
///
/// These are the only signals the harness ever reads; everything behind them
/// is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortSample {
    /// Program counter of the fetch stage.
    pub pc: u64,
    /// Instruction word fetched this cycle.
    pub instr: u32,
    /// Write-back enable for the architectural register file.
    pub write_enable: bool,
    /// Value committed on a write-enabled cycle.
    pub write_data: u64,
}

/// A synchronous device under test.
///
/// The harness drives `clk`/`rst` and reads the sampled outputs, nothing
/// else. Outputs follow synchronous-register semantics: they become valid
/// strictly after a rising clock edge settles.
pub trait SyncDevice {
    /// Drive the clock input.
    fn set_clk(&mut self, level: bool);

    /// Drive the reset input (active high).
    fn set_rst(&mut self, level: bool);

    /// Settle combinational and sequential logic for the current inputs.
    fn eval(&mut self);

    /// Sample the output ports. Valid after `eval`.
    fn sample(&self) -> PortSample;
}

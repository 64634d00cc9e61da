//! Cycle driver: the clock/reset protocol and simulated time.

use tracing::warn;

use crate::device::{PortSample, SyncDevice};
use crate::wave::VcdSink;

/// Drives one DUT through its clock/reset protocol.
///
/// Owns the simulated-time counter as an instance field so multiple drivers
/// can coexist in one process. One tick is one full clock period: a
/// falling-edge settle phase followed by a rising-edge commit phase, each
/// with its own waveform timestamp. Outputs sampled by [`tick`] are valid
/// because the rising edge has settled before the sample is taken.
///
/// [`tick`]: CycleDriver::tick
pub struct CycleDriver<D> {
    dut: D,
    sim_time: u64,
    clk: bool,
    rst: bool,
    wave: Option<VcdSink>,
}

impl<D: SyncDevice> CycleDriver<D> {
    pub fn new(dut: D) -> Self {
        Self {
            dut,
            sim_time: 0,
            clk: false,
            rst: false,
            wave: None,
        }
    }

    /// Attach a waveform sink.
    ///
    /// Can be attached at any point in a run; dumping starts with the next
    /// half-tick. Dumping is a pure observability side channel: a sink
    /// failure is reported once, the sink is dropped, and comparison
    /// outcomes are unaffected.
    pub fn set_wave(&mut self, wave: VcdSink) {
        self.wave = Some(wave);
    }

    /// Current simulated time, in half-tick deltas.
    pub const fn sim_time(&self) -> u64 {
        self.sim_time
    }

    /// Advance the DUT by one full clock period and sample its outputs.
    pub fn tick(&mut self) -> PortSample {
        self.half_tick(false);
        self.half_tick(true);
        self.dut.sample()
    }

    /// Hold reset asserted for `cycles` full ticks, then deassert it.
    ///
    /// Samples taken while reset is asserted are not meaningful for
    /// comparison; program cycle counting starts after this returns.
    pub fn reset(&mut self, cycles: u32) {
        self.rst = true;
        self.dut.set_rst(true);
        for _ in 0..cycles {
            self.tick();
        }
        self.rst = false;
        self.dut.set_rst(false);
    }

    /// Flush and close the waveform sink, returning the DUT.
    pub fn finish(mut self) -> std::io::Result<D> {
        if let Some(wave) = self.wave.take() {
            wave.finish()?;
        }
        Ok(self.dut)
    }

    fn half_tick(&mut self, level: bool) {
        self.clk = level;
        self.dut.set_clk(level);
        self.dut.eval();
        self.dump();
        self.sim_time += 1;
    }

    fn dump(&mut self) {
        let Some(wave) = self.wave.as_mut() else {
            return;
        };
        let sample = self.dut.sample();
        if let Err(err) = wave.dump(self.sim_time, self.clk, self.rst, &sample) {
            warn!("waveform sink failed, disabling capture: {err}");
            self.wave = None;
        }
    }
}

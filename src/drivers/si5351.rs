//! `Si5351A` Clock Synthesizer Driver
//!
//! Produces the panel's output on CLK0 and a 90° copy on CLK1. The
//! register values come from [`crate::synth::SynthPlan`]; this driver
//! only sequences the writes.

use embassy_time::{block_for, Duration};

use crate::hal::i2c::{I2cAddress, I2cBus};
use crate::hal::SynthesizerPort;
use crate::synth::SynthPlan;
use crate::types::Frequency;

/// `Si5351A` register addresses
mod reg {
    pub const DEVICE_STATUS: u8 = 0;
    pub const OUTPUT_ENABLE: u8 = 3;
    pub const CLK0_CONTROL: u8 = 16;
    pub const CLK1_CONTROL: u8 = 17;
    pub const CLK2_CONTROL: u8 = 18;
    pub const PLLA_PARAMS: u8 = 26;
    pub const MS0_PARAMS: u8 = 42;
    pub const MS1_PARAMS: u8 = 50;
    pub const CLK0_PHASE: u8 = 165;
    pub const CLK1_PHASE: u8 = 166;
    pub const PLL_RESET: u8 = 177;
    pub const CRYSTAL_LOAD: u8 = 183;
}

/// Status bit set while the device is still initializing
const SYS_INIT: u8 = 0x80;

/// Clock control: powered down
const CLK_POWER_DOWN: u8 = 0x80;

/// Clock control: source multisynth, PLL A, fractional mode
const CLK_SRC_MULTISYNTH: u8 = 0x0C;

/// PLL reset register: reset PLL A
const PLLA_RESET: u8 = 0x20;

/// Output enable register: CLK0 and CLK1 on (active low)
const CLK0_CLK1_ENABLED: u8 = 0xFC;

/// Ready polls before giving up
const READY_ATTEMPTS: u32 = 100;

/// Errors from the `Si5351A` driver
#[derive(Debug)]
pub enum Si5351Error {
    /// Underlying I2C bus error
    I2c(embassy_stm32::i2c::Error),
    /// Device never cleared `SYS_INIT`
    NotReady,
    /// No register settings reach the requested frequency
    Unreachable(Frequency),
}

impl From<embassy_stm32::i2c::Error> for Si5351Error {
    fn from(error: embassy_stm32::i2c::Error) -> Self {
        Self::I2c(error)
    }
}

impl defmt::Format for Si5351Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            Self::NotReady => defmt::write!(f, "device not ready"),
            Self::Unreachable(freq) => defmt::write!(f, "cannot synthesize {}", freq),
        }
    }
}

/// Drive strength setting
#[derive(Clone, Copy, Debug, Default)]
pub enum DriveStrength {
    /// 2mA drive
    Drive2mA,
    /// 4mA drive
    Drive4mA,
    /// 6mA drive
    Drive6mA,
    /// 8mA drive (maximum)
    #[default]
    Drive8mA,
}

impl DriveStrength {
    /// Get register value
    const fn as_reg(self) -> u8 {
        match self {
            Self::Drive2mA => 0,
            Self::Drive4mA => 1,
            Self::Drive6mA => 2,
            Self::Drive8mA => 3,
        }
    }
}

/// Crystal load capacitance
#[derive(Clone, Copy, Debug, Default)]
pub enum CrystalLoad {
    /// 6 pF load
    Load6pF,
    /// 8 pF load
    Load8pF,
    /// 10 pF load
    #[default]
    Load10pF,
}

impl CrystalLoad {
    const fn as_reg(self) -> u8 {
        match self {
            Self::Load6pF => 0b0101_0010,
            Self::Load8pF => 0b1001_0010,
            Self::Load10pF => 0b1101_0010,
        }
    }
}

/// `Si5351A` driver
pub struct Si5351<'d> {
    bus: I2cBus<'d>,
    load: CrystalLoad,
    drive: DriveStrength,
}

impl<'d> Si5351<'d> {
    /// Create a new `Si5351A` driver
    #[must_use]
    pub fn new(bus: I2cBus<'d>, load: CrystalLoad, drive: DriveStrength) -> Self {
        Self { bus, load, drive }
    }

    /// Wait for device to be ready (`SYS_INIT` cleared)
    fn wait_ready(&mut self) -> Result<(), Si5351Error> {
        for _ in 0..READY_ATTEMPTS {
            let status = self.bus.read_reg(I2cAddress::SI5351, reg::DEVICE_STATUS)?;
            if status & SYS_INIT == 0 {
                return Ok(());
            }
            block_for(Duration::from_millis(1));
        }
        Err(Si5351Error::NotReady)
    }

    /// Write every register of `plan`, then reset PLL A so CLK0 and CLK1
    /// start phase-aligned.
    fn program(&mut self, plan: &SynthPlan) -> Result<(), Si5351Error> {
        let addr = I2cAddress::SI5351;

        self.bus
            .write_regs(addr, reg::PLLA_PARAMS, &plan.pll.to_registers())?;

        let ms = plan.ms.to_registers();
        self.bus.write_regs(addr, reg::MS0_PARAMS, &ms)?;
        self.bus.write_regs(addr, reg::MS1_PARAMS, &ms)?;

        self.bus.write_reg(addr, reg::CLK0_PHASE, 0)?;
        self.bus
            .write_reg(addr, reg::CLK1_PHASE, plan.quadrature_phase)?;

        let control = CLK_SRC_MULTISYNTH | self.drive.as_reg();
        self.bus.write_reg(addr, reg::CLK0_CONTROL, control)?;
        self.bus.write_reg(addr, reg::CLK1_CONTROL, control)?;

        self.bus.write_reg(addr, reg::PLL_RESET, PLLA_RESET)?;
        self.bus
            .write_reg(addr, reg::OUTPUT_ENABLE, CLK0_CLK1_ENABLED)?;
        Ok(())
    }
}

impl SynthesizerPort for Si5351<'_> {
    type Error = Si5351Error;

    fn initialize(&mut self) -> Result<(), Si5351Error> {
        self.wait_ready()?;

        let addr = I2cAddress::SI5351;
        // Disable all outputs during configuration
        self.bus.write_reg(addr, reg::OUTPUT_ENABLE, 0xFF)?;
        self.bus
            .write_reg(addr, reg::CRYSTAL_LOAD, self.load.as_reg())?;

        for control in [reg::CLK0_CONTROL, reg::CLK1_CONTROL, reg::CLK2_CONTROL] {
            self.bus.write_reg(addr, control, CLK_POWER_DOWN)?;
        }
        defmt::info!("Si5351 ready");
        Ok(())
    }

    fn apply(&mut self, frequency: Frequency) -> Result<(), Si5351Error> {
        let plan = SynthPlan::for_frequency(frequency).ok_or(Si5351Error::Unreachable(frequency))?;
        defmt::trace!(
            "Si5351 plan: pll {} ms {}+{}/{} phase {}",
            plan.pll.a,
            plan.ms.a,
            plan.ms.b,
            plan.ms.c,
            plan.quadrature_phase
        );
        self.program(&plan)
    }
}

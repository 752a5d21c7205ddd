//! I2C Bus Abstractions
//!
//! Blocking register access for the `Si5351A`. The control loop is a
//! single busy loop, so the blocking embassy-stm32 driver is used.

use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Blocking;

/// I2C operation result
pub type I2cResult<T> = Result<T, I2cError>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// `Si5351A` clock synthesizer address
    pub const SI5351: Self = Self(crate::config::SI5351_I2C_ADDR);

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// Maximum register block written in one transaction
const MAX_BLOCK: usize = 8;

/// Blocking I2C bus wrapper
pub struct I2cBus<'d> {
    i2c: I2c<'d, Blocking>,
}

impl<'d> I2cBus<'d> {
    /// Create a new I2C bus wrapper
    #[must_use]
    pub fn new(i2c: I2c<'d, Blocking>) -> Self {
        Self { i2c }
    }

    /// Write a single register
    pub fn write_reg(&mut self, addr: I2cAddress, reg: u8, value: u8) -> I2cResult<()> {
        self.i2c.blocking_write(addr.addr(), &[reg, value])
    }

    /// Read a single register
    pub fn read_reg(&mut self, addr: I2cAddress, reg: u8) -> I2cResult<u8> {
        let mut buf = [0u8];
        self.i2c.blocking_write_read(addr.addr(), &[reg], &mut buf)?;
        Ok(buf[0])
    }

    /// Write consecutive registers starting at `base_reg`
    pub fn write_regs(&mut self, addr: I2cAddress, base_reg: u8, values: &[u8]) -> I2cResult<()> {
        if values.len() <= MAX_BLOCK {
            let mut buf = [0u8; MAX_BLOCK + 1];
            buf[0] = base_reg;
            buf[1..=values.len()].copy_from_slice(values);
            self.i2c.blocking_write(addr.addr(), &buf[..=values.len()])
        } else {
            for (reg, &value) in (base_reg..).zip(values) {
                self.write_reg(addr, reg, value)?;
            }
            Ok(())
        }
    }
}

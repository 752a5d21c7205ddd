//! Hardware Abstraction Layer
//!
//! The control core talks to hardware only through the traits in this
//! module, so it runs unchanged on the target and against test fakes on
//! the host. The pin wrappers in `gpio` are generic over `embedded-hal`;
//! the STM32G474 bus and serial implementations are feature-gated.

use crate::radio::panel::PanelLevels;
use crate::types::Frequency;

pub mod gpio;
#[cfg(feature = "embedded")]
pub mod i2c;
#[cfg(feature = "embedded")]
pub mod uart;

/// Clock synthesizer that produces the output frequency
pub trait SynthesizerPort {
    /// Error reported by the underlying bus or device
    type Error;

    /// One-time device bring-up, called before the first `apply`
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Program the outputs for `frequency`. Blocks until written.
    fn apply(&mut self, frequency: Frequency) -> Result<(), Self::Error>;
}

/// Byte-oriented serial link to the host computer
///
/// Both operations block until the hardware is ready. There is no
/// timeout: a host that never sends stalls the caller.
pub trait HostLink {
    /// Error reported by the serial peripheral
    type Error;

    /// Wait for and return the next received byte
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Wait for the transmitter and send one byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Send every byte of `bytes` in order
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

/// Transmit-enable output line
pub trait TxEnableOutput {
    /// Drive the line high (`true`) or low (`false`)
    fn set_enabled(&mut self, enabled: bool);
}

/// Front-panel inputs and the host-present line
pub trait PanelInputs {
    /// Current level of the host-present (DTR) signal
    fn host_present(&mut self) -> bool;

    /// Raw levels of the four panel buttons
    fn sample(&mut self) -> PanelLevels;
}

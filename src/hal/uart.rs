//! Host serial link
//!
//! USART1 in blocking mode. Reads spin until a byte arrives and writes
//! spin until the transmit register is free, with no timeout.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{Config, DataBits, Error as UartError, Parity, StopBits, Uart};

use crate::config::CAT_BAUD_RATE;
use crate::hal::HostLink;

/// UART operation result
pub type UartResult<T> = Result<T, UartError>;

/// CAT link line settings: 9600 baud, 8N1
#[must_use]
pub fn cat_config() -> Config {
    let mut config = Config::default();
    config.baudrate = CAT_BAUD_RATE;
    config.data_bits = DataBits::DataBits8;
    config.stop_bits = StopBits::STOP1;
    config.parity = Parity::ParityNone;
    config
}

/// Blocking serial link to the host
pub struct HostUart<'d> {
    uart: Uart<'d, Blocking>,
}

impl<'d> HostUart<'d> {
    /// Wrap a UART already configured with [`cat_config`]
    #[must_use]
    pub fn new(uart: Uart<'d, Blocking>) -> Self {
        Self { uart }
    }
}

impl HostLink for HostUart<'_> {
    type Error = UartError;

    fn read_byte(&mut self) -> UartResult<u8> {
        let mut buf = [0u8];
        self.uart.blocking_read(&mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, byte: u8) -> UartResult<()> {
        self.uart.blocking_write(&[byte])
    }

    fn write_all(&mut self, bytes: &[u8]) -> UartResult<()> {
        self.uart.blocking_write(bytes)?;
        self.uart.blocking_flush()
    }
}

//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the synthesizer panel.
//! Frequency limits, the step table, CAT link parameters and the pin map
//! are centralized here.

use crate::types::{Frequency, TuningStep};

/// Lowest output frequency the panel will tune to (8 MHz)
pub const MIN_FREQUENCY_HZ: u32 = 8_000_000;

/// Highest output frequency the panel will tune to (16 MHz)
pub const MAX_FREQUENCY_HZ: u32 = 16_000_000;

/// Frequency applied once at boot, before the control loop starts (10 MHz)
pub const DEFAULT_FREQUENCY_HZ: u32 = 10_000_000;

/// Step size selected at boot
pub const DEFAULT_TUNING_STEP: TuningStep = TuningStep::MHz1;

/// Step sizes in precision-mode order
pub const STEP_TABLE_HZ: [u32; 4] = [1_000_000, 100_000, 10_000, 1_000];

/// CAT link baud rate (8 data bits, 1 stop bit, no parity)
pub const CAT_BAUD_RATE: u32 = 9_600;

/// CAT command terminator
pub const CAT_TERMINATOR: u8 = b';';

/// Characters kept per command line; excess characters are dropped
pub const CAT_LINE_CAPACITY: usize = 30;

/// Longest response line the dispatcher can produce
pub const CAT_RESPONSE_CAPACITY: usize = 32;

/// Transceiver identity reported by `ID`
pub const CAT_IDENTITY: &str = "0650";

/// I2C bus frequency for `Si5351A`
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// `Si5351A` I2C address
pub const SI5351_I2C_ADDR: u8 = 0x60;

/// `Si5351A` crystal frequency (25 MHz standard)
pub const SI5351_XTAL_FREQ: u32 = 25_000_000;

/// Fixed PLL A VCO frequency (800 MHz)
pub const PLL_VCO_HZ: u32 = 800_000_000;

/// Phase shift between CLK0 and CLK1 in degrees
pub const QUADRATURE_PHASE_DEG: u32 = 90;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the panel wiring

    /// Increase-frequency button (active high, pull-down)
    pub const BUTTON_INCREASE: &str = "PC0";

    /// Decrease-frequency button (active high, pull-down)
    pub const BUTTON_DECREASE: &str = "PC1";

    /// Toggle-transmit button (active low, pull-up)
    pub const BUTTON_TOGGLE_TX: &str = "PC2";

    /// Cycle-step-size button (active high, pull-down)
    pub const BUTTON_CYCLE_STEP: &str = "PC3";

    /// Host-present (DTR from the USB-UART adapter, active high)
    pub const HOST_PRESENT: &str = "PA8";

    /// Transmit-enable output (high = TX)
    pub const TX_ENABLE: &str = "PB0";

    /// USART1 TX to the host
    pub const CAT_TX: &str = "PA9";

    /// USART1 RX from the host
    pub const CAT_RX: &str = "PA10";

    /// I2C1 SCL (Si5351)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (Si5351)
    pub const I2C1_SDA: &str = "PB9";
}

/// Build the default startup frequency
#[must_use]
pub const fn default_frequency() -> Option<Frequency> {
    Frequency::from_hz(DEFAULT_FREQUENCY_HZ)
}

//! GPIO Abstractions
//!
//! Type-safe GPIO pin wrappers for the synthesizer panel.
//! Provides semantic meaning to pins through the type system. The
//! wrappers accept any `embedded-hal` pin; `main` hands them
//! embassy-stm32 `Input`/`Output` pins.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::hal::{PanelInputs, TxEnableOutput};
use crate::radio::panel::PanelLevels;

/// Front-panel buttons plus the host-present line
///
/// Levels are returned raw; polarity is decided by
/// [`PanelLevels::actions`]. A pin that fails to read counts as low.
pub struct PanelButtons<P> {
    increase: P,
    decrease: P,
    toggle_tx: P,
    cycle_step: P,
    host_present: P,
}

impl<P: InputPin> PanelButtons<P> {
    /// Group the panel inputs. `toggle_tx` should be pulled up, the
    /// others pulled down.
    #[must_use]
    pub fn new(increase: P, decrease: P, toggle_tx: P, cycle_step: P, host_present: P) -> Self {
        Self {
            increase,
            decrease,
            toggle_tx,
            cycle_step,
            host_present,
        }
    }
}

fn level<P: InputPin>(pin: &mut P) -> bool {
    pin.is_high().unwrap_or(false)
}

impl<P: InputPin> PanelInputs for PanelButtons<P> {
    fn host_present(&mut self) -> bool {
        level(&mut self.host_present)
    }

    fn sample(&mut self) -> PanelLevels {
        PanelLevels {
            increase: level(&mut self.increase),
            decrease: level(&mut self.decrease),
            toggle_tx: level(&mut self.toggle_tx),
            cycle_step: level(&mut self.cycle_step),
        }
    }
}

/// Transmit-enable output (high = TX)
pub struct TxEnable<P> {
    pin: P,
}

impl<P: OutputPin> TxEnable<P> {
    /// Create TX-enable control, driving the line low
    pub fn new(pin: P) -> Self {
        let mut tx = Self { pin };
        tx.set_enabled(false);
        tx
    }
}

impl<P: OutputPin> TxEnableOutput for TxEnable<P> {
    fn set_enabled(&mut self, enabled: bool) {
        let driven = if enabled {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if driven.is_err() {
            #[cfg(feature = "embedded")]
            defmt::warn!("tx-enable pin write failed");
        }
    }
}

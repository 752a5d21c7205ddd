//! Control State
//!
//! The single record of tunable parameters. Every change goes through one
//! of the methods below; a request that would break an invariant leaves
//! the state untouched and reports `None`.

use crate::config::DEFAULT_TUNING_STEP;
use crate::types::{Frequency, TuningStep};

/// Complete panel state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    /// Current output frequency
    frequency: Frequency,
    /// Tuning step size (doubles as the precision mode)
    step: TuningStep,
    /// Transmit enabled
    tx_enabled: bool,
    /// `AI` flag, protocol state only
    auto_info: bool,
    /// `ST` flag, protocol state only
    split: bool,
}

impl ControlState {
    /// Create a new control state at `frequency` with the boot step size,
    /// TX off and both protocol flags clear
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            step: DEFAULT_TUNING_STEP,
            tx_enabled: false,
            auto_info: false,
            split: false,
        }
    }

    /// Get current frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Get tuning step
    #[must_use]
    pub const fn step(&self) -> TuningStep {
        self.step
    }

    /// Get precision-mode index of the current step
    #[must_use]
    pub const fn precision_mode(&self) -> u8 {
        self.step.precision_mode()
    }

    /// Check if transmit is enabled
    #[must_use]
    pub const fn tx_enabled(&self) -> bool {
        self.tx_enabled
    }

    /// Get the `AI` flag
    #[must_use]
    pub const fn auto_info(&self) -> bool {
        self.auto_info
    }

    /// Get the `ST` flag
    #[must_use]
    pub const fn split(&self) -> bool {
        self.split
    }

    /// Move up one step. Returns the new frequency, or None at the ceiling.
    pub fn step_up(&mut self) -> Option<Frequency> {
        let frequency = self.frequency.step_up(self.step)?;
        self.frequency = frequency;
        Some(frequency)
    }

    /// Move down one step. Returns the new frequency, or None at the floor.
    pub fn step_down(&mut self) -> Option<Frequency> {
        let frequency = self.frequency.step_down(self.step)?;
        self.frequency = frequency;
        Some(frequency)
    }

    /// Retune to an arbitrary value. Out-of-range values are rejected.
    pub fn retune(&mut self, hz: u32) -> Option<Frequency> {
        let frequency = Frequency::from_hz(hz)?;
        self.frequency = frequency;
        Some(frequency)
    }

    /// Advance to the next step size and return it
    pub fn cycle_step(&mut self) -> TuningStep {
        self.step = self.step.next();
        self.step
    }

    /// Flip the transmit flag and return the new value
    pub fn toggle_tx(&mut self) -> bool {
        self.tx_enabled = !self.tx_enabled;
        self.tx_enabled
    }

    /// Set the `AI` flag
    pub fn set_auto_info(&mut self, on: bool) {
        self.auto_info = on;
    }

    /// Set the `ST` flag
    pub fn set_split(&mut self, on: bool) {
        self.split = on;
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(Frequency::DEFAULT)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ControlState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Panel({}, step {}, tx {})",
            self.frequency,
            self.step,
            self.tx_enabled
        );
    }
}

//! Control State Mutators
//!
//! Binds the control state to its two hardware side effects: every
//! accepted frequency change is applied to the synthesizer, and every TX
//! change is mirrored on the transmit-enable line. Both the panel and the
//! CAT dispatcher mutate state only through [`Controls`].

use crate::hal::{SynthesizerPort, TxEnableOutput};
use crate::radio::state::ControlState;
use crate::types::{Frequency, TuningStep};

/// Control state plus the outputs it drives
pub struct Controls<S, T> {
    state: ControlState,
    synth: S,
    tx: T,
}

impl<S, T> Controls<S, T>
where
    S: SynthesizerPort,
    T: TxEnableOutput,
{
    /// Wrap `state` with its synthesizer and TX-enable output
    pub fn new(state: ControlState, synth: S, tx: T) -> Self {
        Self { state, synth, tx }
    }

    /// Boot sequence: initialize the synthesizer, drive the TX line to
    /// match the state, then apply the current frequency.
    ///
    /// # Errors
    ///
    /// Returns the synthesizer error if initialization fails. The TX line
    /// and frequency are still applied in that case.
    pub fn start(&mut self) -> Result<(), S::Error> {
        let init = self.synth.initialize();
        if init.is_err() {
            #[cfg(feature = "embedded")]
            defmt::error!("synthesizer initialization failed");
        }
        self.tx.set_enabled(self.state.tx_enabled());
        self.apply();
        init
    }

    /// Read-only view of the control state
    #[must_use]
    pub const fn state(&self) -> &ControlState {
        &self.state
    }

    /// The synthesizer port
    #[must_use]
    pub const fn synth(&self) -> &S {
        &self.synth
    }

    /// The transmit-enable output
    #[must_use]
    pub const fn tx_output(&self) -> &T {
        &self.tx
    }

    /// Step up; no-op if the result would exceed the ceiling
    pub fn increase_frequency(&mut self) -> Option<Frequency> {
        let frequency = self.state.step_up()?;
        self.apply();
        Some(frequency)
    }

    /// Step down; no-op if the result would fall below the floor
    pub fn decrease_frequency(&mut self) -> Option<Frequency> {
        let frequency = self.state.step_down()?;
        self.apply();
        Some(frequency)
    }

    /// Retune to `hz`; out-of-range values are silently rejected
    pub fn set_frequency(&mut self, hz: u32) -> Option<Frequency> {
        let Some(frequency) = self.state.retune(hz) else {
            #[cfg(feature = "embedded")]
            defmt::debug!("rejected frequency {} Hz", hz);
            return None;
        };
        self.apply();
        Some(frequency)
    }

    /// Advance the precision mode and return the new step size
    pub fn cycle_step_size(&mut self) -> TuningStep {
        let step = self.state.cycle_step();
        #[cfg(feature = "embedded")]
        defmt::info!("step size {}", step);
        step
    }

    /// Flip TX and drive the output line to match
    pub fn toggle_tx(&mut self) -> bool {
        let enabled = self.state.toggle_tx();
        self.tx.set_enabled(enabled);
        #[cfg(feature = "embedded")]
        defmt::info!("tx {}", if enabled { "on" } else { "off" });
        enabled
    }

    /// Set TX, toggling only when the requested value differs
    pub fn set_tx(&mut self, enabled: bool) {
        if self.state.tx_enabled() != enabled {
            self.toggle_tx();
        }
    }

    /// Set the `AI` flag
    pub fn set_auto_info(&mut self, on: bool) {
        self.state.set_auto_info(on);
    }

    /// Set the `ST` flag
    pub fn set_split(&mut self, on: bool) {
        self.state.set_split(on);
    }

    /// Push the current frequency to the synthesizer
    fn apply(&mut self) {
        let frequency = self.state.frequency();
        if self.synth.apply(frequency).is_err() {
            #[cfg(feature = "embedded")]
            defmt::warn!("synthesizer apply failed at {}", frequency);
            return;
        }
        #[cfg(feature = "embedded")]
        defmt::info!("tuned to {}", frequency);
    }
}

//! Control loop
//!
//! One [`Controller::poll`] is one iteration of the panel's main loop:
//! sample host-present, let the arbiter pick the mode, then service
//! exactly one input path. In HostControl the buttons are never sampled,
//! so presses made while the host holds the line are lost rather than
//! queued.

use crate::hal::{HostLink, PanelInputs, SynthesizerPort, TxEnableOutput};
use crate::protocol::{dispatch, CatParser};
use crate::radio::arbiter::ModeArbiter;
use crate::radio::controls::Controls;
use crate::radio::panel::ManualAction;
use crate::types::ControlMode;

/// Main-loop owner of the control state and every port
pub struct Controller<L, I, S, T> {
    link: L,
    inputs: I,
    controls: Controls<S, T>,
    parser: CatParser,
    arbiter: ModeArbiter,
}

impl<L, I, S, T> Controller<L, I, S, T>
where
    L: HostLink,
    I: PanelInputs,
    S: SynthesizerPort,
    T: TxEnableOutput,
{
    /// Assemble a controller; call [`Self::start`] before polling
    pub fn new(link: L, inputs: I, controls: Controls<S, T>) -> Self {
        Self {
            link,
            inputs,
            controls,
            parser: CatParser::new(),
            arbiter: ModeArbiter::new(),
        }
    }

    /// Run the boot sequence on the controls.
    ///
    /// # Errors
    ///
    /// Propagates a synthesizer initialization failure. The boot frequency
    /// has still been applied.
    pub fn start(&mut self) -> Result<(), S::Error> {
        self.controls.start()
    }

    /// Run the control loop forever
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// One loop iteration. Returns the mode that was serviced.
    ///
    /// In HostControl this blocks until the link delivers a byte.
    pub fn poll(&mut self) -> ControlMode {
        if let Some(mode) = self.arbiter.update(self.inputs.host_present()) {
            self.on_transition(mode);
        }

        let mode = self.arbiter.mode();
        match mode {
            ControlMode::Manual => self.service_panel(),
            ControlMode::HostControl => self.service_host(),
        }
        mode
    }

    /// Mode serviced by the last poll
    #[must_use]
    pub const fn mode(&self) -> ControlMode {
        self.arbiter.mode()
    }

    /// Control state and outputs
    #[must_use]
    pub const fn controls(&self) -> &Controls<S, T> {
        &self.controls
    }

    /// Partially received command line
    #[must_use]
    pub fn pending_command(&self) -> &[u8] {
        self.parser.pending()
    }

    fn on_transition(&mut self, mode: ControlMode) {
        #[cfg(feature = "embedded")]
        defmt::info!("control mode -> {}", mode);
        if mode == ControlMode::Manual {
            self.parser.clear();
        }
    }

    fn service_panel(&mut self) {
        for action in self.inputs.sample().actions() {
            match action {
                ManualAction::IncreaseFrequency => {
                    self.controls.increase_frequency();
                }
                ManualAction::DecreaseFrequency => {
                    self.controls.decrease_frequency();
                }
                ManualAction::ToggleTx => {
                    self.controls.toggle_tx();
                }
                ManualAction::CycleStepSize => {
                    self.controls.cycle_step_size();
                }
            }
        }
    }

    fn service_host(&mut self) {
        let Ok(byte) = self.link.read_byte() else {
            #[cfg(feature = "embedded")]
            defmt::warn!("host link receive error");
            return;
        };

        let Some(line) = self.parser.feed(byte) else {
            return;
        };

        if let Some(response) = dispatch(&line, &mut self.controls) {
            if self.link.write_all(response.as_bytes()).is_err() {
                #[cfg(feature = "embedded")]
                defmt::warn!("host link transmit error, dropped {}", response);
            }
        }
    }
}

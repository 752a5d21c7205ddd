//! Hardware fakes shared by the integration tests
//!
//! Each fake hands out a cloneable handle so a test can keep driving
//! inputs and inspecting outputs after the fake has been moved into a
//! `Controller`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use synth_panel::hal::{HostLink, PanelInputs, SynthesizerPort, TxEnableOutput};
use synth_panel::radio::controller::Controller;
use synth_panel::radio::controls::Controls;
use synth_panel::radio::panel::PanelLevels;
use synth_panel::radio::state::ControlState;
use synth_panel::types::Frequency;

/// Synthesizer that records every call
#[derive(Clone, Default)]
pub struct RecordingSynth {
    pub initialized: Rc<RefCell<u32>>,
    pub applied: Rc<RefCell<Vec<u32>>>,
    pub fail: Rc<RefCell<bool>>,
}

impl RecordingSynth {
    pub fn applied(&self) -> Vec<u32> {
        self.applied.borrow().clone()
    }

    pub fn apply_count(&self) -> usize {
        self.applied.borrow().len()
    }

    pub fn last_applied(&self) -> Option<u32> {
        self.applied.borrow().last().copied()
    }
}

impl SynthesizerPort for RecordingSynth {
    type Error = ();

    fn initialize(&mut self) -> Result<(), ()> {
        *self.initialized.borrow_mut() += 1;
        if *self.fail.borrow() {
            Err(())
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, frequency: Frequency) -> Result<(), ()> {
        self.applied.borrow_mut().push(frequency.as_hz());
        if *self.fail.borrow() {
            Err(())
        } else {
            Ok(())
        }
    }
}

/// TX-enable line that records every level it is driven to
#[derive(Clone, Default)]
pub struct RecordingTx {
    pub levels: Rc<RefCell<Vec<bool>>>,
}

impl RecordingTx {
    pub fn levels(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.levels.borrow().last().copied()
    }

    /// Number of times the line actually changed level
    pub fn edges(&self) -> usize {
        let levels = self.levels.borrow();
        levels.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

impl TxEnableOutput for RecordingTx {
    fn set_enabled(&mut self, enabled: bool) {
        self.levels.borrow_mut().push(enabled);
    }
}

/// Host link fed from a script; reading past the end is an error
#[derive(Clone, Default)]
pub struct ScriptedLink {
    pub rx: Rc<RefCell<VecDeque<u8>>>,
    pub tx: Rc<RefCell<Vec<u8>>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LinkIdle;

impl ScriptedLink {
    pub fn send(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    pub fn pending(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Everything written so far, cleared afterwards
    pub fn take_output(&self) -> String {
        let bytes = std::mem::take(&mut *self.tx.borrow_mut());
        String::from_utf8(bytes).expect("responses are ASCII")
    }
}

impl HostLink for ScriptedLink {
    type Error = LinkIdle;

    fn read_byte(&mut self) -> Result<u8, LinkIdle> {
        self.rx.borrow_mut().pop_front().ok_or(LinkIdle)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), LinkIdle> {
        self.tx.borrow_mut().push(byte);
        Ok(())
    }
}

/// Panel whose levels the test sets directly
#[derive(Clone)]
pub struct ScriptedPanel {
    pub host_present: Rc<RefCell<bool>>,
    pub levels: Rc<RefCell<PanelLevels>>,
    pub samples: Rc<RefCell<u32>>,
}

impl Default for ScriptedPanel {
    fn default() -> Self {
        Self {
            host_present: Rc::new(RefCell::new(false)),
            levels: Rc::new(RefCell::new(PanelLevels::IDLE)),
            samples: Rc::new(RefCell::new(0)),
        }
    }
}

impl ScriptedPanel {
    pub fn set_host_present(&self, asserted: bool) {
        *self.host_present.borrow_mut() = asserted;
    }

    pub fn set_levels(&self, levels: PanelLevels) {
        *self.levels.borrow_mut() = levels;
    }

    pub fn release_all(&self) {
        self.set_levels(PanelLevels::IDLE);
    }

    pub fn samples(&self) -> u32 {
        *self.samples.borrow()
    }
}

impl PanelInputs for ScriptedPanel {
    fn host_present(&mut self) -> bool {
        *self.host_present.borrow()
    }

    fn sample(&mut self) -> PanelLevels {
        *self.samples.borrow_mut() += 1;
        *self.levels.borrow()
    }
}

pub type TestControls = Controls<RecordingSynth, RecordingTx>;
pub type TestController = Controller<ScriptedLink, ScriptedPanel, RecordingSynth, RecordingTx>;

/// Controls at `hz` with fresh fakes
pub fn controls_at(hz: u32) -> (TestControls, RecordingSynth, RecordingTx) {
    let synth = RecordingSynth::default();
    let tx = RecordingTx::default();
    let state = ControlState::new(Frequency::from_hz(hz).expect("test frequency in range"));
    (Controls::new(state, synth.clone(), tx.clone()), synth, tx)
}

/// Handles to every fake behind a started controller
pub struct Rig {
    pub controller: TestController,
    pub link: ScriptedLink,
    pub panel: ScriptedPanel,
    pub synth: RecordingSynth,
    pub tx: RecordingTx,
}

impl Rig {
    /// Booted controller at the default frequency
    pub fn boot() -> Self {
        let link = ScriptedLink::default();
        let panel = ScriptedPanel::default();
        let synth = RecordingSynth::default();
        let tx = RecordingTx::default();
        let controls = Controls::new(ControlState::default(), synth.clone(), tx.clone());
        let mut controller = Controller::new(link.clone(), panel.clone(), controls);
        controller.start().expect("fake synthesizer starts");
        Self {
            controller,
            link,
            panel,
            synth,
            tx,
        }
    }

    /// Send `bytes` in HostControl and poll until the link is drained
    pub fn host_session(&mut self, bytes: &[u8]) -> String {
        self.panel.set_host_present(true);
        self.link.send(bytes);
        while self.link.pending() > 0 {
            self.controller.poll();
        }
        self.link.take_output()
    }

    pub fn frequency(&self) -> u32 {
        self.controller.controls().state().frequency().as_hz()
    }
}

//! Front-panel input decoding
//!
//! Turns one sample of raw button levels into the actions to run this
//! loop iteration. Levels are used as read: there is no debouncing, so a
//! held button fires once per iteration.

use heapless::Vec;

/// Raw logic levels of the four panel buttons (`true` = high)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLevels {
    /// Increase-frequency input
    pub increase: bool,
    /// Decrease-frequency input
    pub decrease: bool,
    /// Toggle-transmit input (active low)
    pub toggle_tx: bool,
    /// Cycle-step-size input
    pub cycle_step: bool,
}

impl PanelLevels {
    /// Levels with no button pressed
    pub const IDLE: Self = Self {
        increase: false,
        decrease: false,
        toggle_tx: true,
        cycle_step: false,
    };

    /// Actions for this sample, in execution order
    #[must_use]
    pub fn actions(self) -> Vec<ManualAction, 4> {
        let mut actions = Vec::new();
        // Capacity matches the number of inputs, so pushes cannot fail
        if self.increase {
            let _ = actions.push(ManualAction::IncreaseFrequency);
        }
        if self.decrease {
            let _ = actions.push(ManualAction::DecreaseFrequency);
        }
        if !self.toggle_tx {
            let _ = actions.push(ManualAction::ToggleTx);
        }
        if self.cycle_step {
            let _ = actions.push(ManualAction::CycleStepSize);
        }
        actions
    }
}

impl Default for PanelLevels {
    fn default() -> Self {
        Self::IDLE
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PanelLevels {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Levels(inc {}, dec {}, tx {}, step {})",
            self.increase,
            self.decrease,
            self.toggle_tx,
            self.cycle_step
        );
    }
}

/// A front-panel request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManualAction {
    /// Step the frequency up
    IncreaseFrequency,
    /// Step the frequency down
    DecreaseFrequency,
    /// Flip transmit enable
    ToggleTx,
    /// Advance the step size
    CycleStepSize,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ManualAction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::IncreaseFrequency => defmt::write!(f, "Up"),
            Self::DecreaseFrequency => defmt::write!(f, "Down"),
            Self::ToggleTx => defmt::write!(f, "ToggleTX"),
            Self::CycleStepSize => defmt::write!(f, "Step"),
        }
    }
}

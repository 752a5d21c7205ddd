//! Mode Arbiter
//!
//! Decides each loop iteration whether the panel or the host owns the
//! control state. The decision depends only on the host-present level
//! sampled that iteration; nothing is latched. The stored mode exists so
//! the caller can see transitions.

use crate::types::ControlMode;

/// Two-state Manual / HostControl arbiter
#[derive(Clone, Copy, Debug, Default)]
pub struct ModeArbiter {
    mode: ControlMode,
}

impl ModeArbiter {
    /// Create an arbiter in Manual mode
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: ControlMode::Manual,
        }
    }

    /// Mode chosen at the last update
    #[must_use]
    pub const fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Re-evaluate from the host-present level.
    ///
    /// Returns the new mode when it differs from the previous one.
    pub fn update(&mut self, host_present: bool) -> Option<ControlMode> {
        let next = ControlMode::from_host_present(host_present);
        if next == self.mode {
            return None;
        }
        self.mode = next;
        Some(next)
    }
}

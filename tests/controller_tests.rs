//! Control Loop Tests
//!
//! Drives the controller through the fakes in `common`: boot, manual
//! panel handling, host sessions and switching between the two.

mod common;

use common::Rig;
use synth_panel::radio::panel::PanelLevels;
use synth_panel::types::{ControlMode, TuningStep};

const PRESS_INCREASE: PanelLevels = PanelLevels {
    increase: true,
    ..PanelLevels::IDLE
};

const PRESS_DECREASE: PanelLevels = PanelLevels {
    decrease: true,
    ..PanelLevels::IDLE
};

const PRESS_TOGGLE: PanelLevels = PanelLevels {
    toggle_tx: false,
    ..PanelLevels::IDLE
};

const PRESS_STEP: PanelLevels = PanelLevels {
    cycle_step: true,
    ..PanelLevels::IDLE
};

// ============================================================================
// Boot Tests
// ============================================================================

#[test]
fn boot_applies_default_frequency() {
    let rig = Rig::boot();
    assert_eq!(*rig.synth.initialized.borrow(), 1);
    assert_eq!(rig.synth.applied(), [10_000_000]);
    assert_eq!(rig.tx.levels(), [false]);
    assert_eq!(rig.controller.mode(), ControlMode::Manual);
}

// ============================================================================
// Manual Mode Tests
// ============================================================================

#[test]
fn idle_panel_changes_nothing() {
    let mut rig = Rig::boot();
    for _ in 0..5 {
        assert_eq!(rig.controller.poll(), ControlMode::Manual);
    }
    assert_eq!(rig.synth.apply_count(), 1);
    assert_eq!(rig.panel.samples(), 5);
}

#[test]
fn held_button_repeats_every_poll() {
    let mut rig = Rig::boot();
    rig.panel.set_levels(PRESS_INCREASE);
    rig.controller.poll();
    rig.controller.poll();
    assert_eq!(rig.frequency(), 12_000_000);
    assert_eq!(rig.synth.applied(), [10_000_000, 11_000_000, 12_000_000]);
}

#[test]
fn decrease_then_fine_step() {
    let mut rig = Rig::boot();
    rig.panel.set_levels(PRESS_STEP);
    rig.controller.poll();
    assert_eq!(rig.controller.controls().state().step(), TuningStep::KHz100);

    rig.panel.set_levels(PRESS_DECREASE);
    rig.controller.poll();
    assert_eq!(rig.frequency(), 9_900_000);
}

#[test]
fn increase_stops_at_ceiling() {
    let mut rig = Rig::boot();
    rig.panel.set_levels(PRESS_INCREASE);
    for _ in 0..10 {
        rig.controller.poll();
    }
    assert_eq!(rig.frequency(), 16_000_000);
    // boot plus six accepted steps
    assert_eq!(rig.synth.apply_count(), 7);
}

#[test]
fn toggle_button_is_active_low() {
    let mut rig = Rig::boot();
    rig.panel.set_levels(PRESS_TOGGLE);
    rig.controller.poll();
    assert!(rig.controller.controls().state().tx_enabled());
    assert_eq!(rig.tx.level(), Some(true));

    rig.panel.release_all();
    rig.controller.poll();
    assert!(rig.controller.controls().state().tx_enabled());
}

#[test]
fn simultaneous_increase_and_decrease_cancel() {
    let mut rig = Rig::boot();
    rig.panel.set_levels(PanelLevels {
        increase: true,
        decrease: true,
        ..PanelLevels::IDLE
    });
    rig.controller.poll();
    assert_eq!(rig.frequency(), 10_000_000);
    assert_eq!(rig.synth.applied(), [10_000_000, 11_000_000, 10_000_000]);
}

#[test]
fn manual_mode_leaves_host_bytes_unread() {
    let mut rig = Rig::boot();
    rig.link.send(b"ID;");
    rig.controller.poll();
    assert_eq!(rig.link.pending(), 3);
    assert!(rig.link.take_output().is_empty());
}

// ============================================================================
// Mode Switching Tests
// ============================================================================

#[test]
fn host_control_ignores_buttons() {
    let mut rig = Rig::boot();
    rig.panel.set_host_present(true);
    rig.panel.set_levels(PRESS_INCREASE);
    assert_eq!(rig.controller.poll(), ControlMode::HostControl);
    assert_eq!(rig.controller.poll(), ControlMode::HostControl);
    assert_eq!(rig.frequency(), 10_000_000);
    assert_eq!(rig.panel.samples(), 0);
}

#[test]
fn releasing_host_restores_buttons() {
    let mut rig = Rig::boot();
    rig.panel.set_host_present(true);
    rig.controller.poll();

    rig.panel.set_host_present(false);
    rig.panel.set_levels(PRESS_INCREASE);
    assert_eq!(rig.controller.poll(), ControlMode::Manual);
    assert_eq!(rig.frequency(), 11_000_000);
}

#[test]
fn leaving_host_control_discards_partial_line() {
    let mut rig = Rig::boot();
    rig.host_session(b"FA0120");
    assert_eq!(rig.controller.pending_command(), b"FA0120");

    rig.panel.set_host_present(false);
    rig.controller.poll();
    assert!(rig.controller.pending_command().is_empty());

    // The tail alone is not a command
    let reply = rig.host_session(b"00000;");
    assert!(reply.is_empty());
    assert_eq!(rig.frequency(), 10_000_000);
}

#[test]
fn host_changes_survive_return_to_manual() {
    let mut rig = Rig::boot();
    rig.host_session(b"FA015000000;TX1;");
    rig.panel.set_host_present(false);
    rig.panel.set_levels(PRESS_INCREASE);
    rig.controller.poll();
    assert_eq!(rig.frequency(), 16_000_000);
    assert!(rig.controller.controls().state().tx_enabled());
}

// ============================================================================
// Host Session Tests
// ============================================================================

#[test]
fn host_session_full_exchange() {
    let mut rig = Rig::boot();

    assert_eq!(rig.host_session(b"FA014074000;"), "");
    assert_eq!(rig.synth.last_applied(), Some(14_074_000));
    assert_eq!(rig.host_session(b"FA;"), "FA014074000;");

    assert_eq!(rig.host_session(b"TX1;"), "");
    assert_eq!(rig.host_session(b"TX;"), "TX1;");
    assert_eq!(rig.tx.level(), Some(true));
    assert_eq!(rig.host_session(b"TX0;"), "");
    assert_eq!(rig.host_session(b"TX;"), "TX0;");
    assert_eq!(rig.tx.level(), Some(false));

    assert_eq!(rig.host_session(b"AI1;AI;"), "AI1;");
    assert_eq!(rig.host_session(b"AI0;AI;"), "AI0;");
    assert_eq!(rig.host_session(b"ID;"), "ID0650;");
    assert_eq!(rig.host_session(b"MD0;"), "MD0C;");
    assert_eq!(rig.host_session(b"SH0;"), "SH0000;");
    assert_eq!(rig.host_session(b"NA0;"), "NA00;");
    assert_eq!(rig.host_session(b"IF;"), "IF001014074000+000000C00000;");
    assert_eq!(rig.host_session(b"ST1;ST;"), "ST1;");
    assert_eq!(rig.host_session(b"ST0;ST;"), "ST0;");
    assert_eq!(rig.synth.applied(), [10_000_000, 14_074_000]);
}

#[test]
fn host_session_ignores_invalid_commands() {
    let mut rig = Rig::boot();
    let reply = rig.host_session(b"ZZ;FA20000000;MD1;TX5;;FA;");
    assert_eq!(reply, "FA010000000;");
    assert_eq!(rig.synth.apply_count(), 1);
    assert_eq!(rig.tx.levels(), [false]);
}

#[test]
fn host_session_overlong_line_truncated() {
    let mut rig = Rig::boot();
    let mut line = b"FA012000000".to_vec();
    line.extend_from_slice(&[b'0'; 29]);
    line.push(b';');
    // Kept: "FA" + 28 digits, which saturates and is rejected
    assert_eq!(rig.host_session(&line), "");
    assert_eq!(rig.frequency(), 10_000_000);
    assert_eq!(rig.host_session(b"ID;"), "ID0650;");
}

//! Panel Control Logic
//!
//! Control state, its mutators, input decoding, mode arbitration and the
//! main loop. Everything here is hardware-independent and runs on the
//! host under test.

pub mod arbiter;
pub mod controller;
pub mod controls;
pub mod panel;
pub mod state;

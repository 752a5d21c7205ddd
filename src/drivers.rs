//! Peripheral Drivers
//!
//! High-level drivers for external ICs and peripherals.
//! These provide domain-specific abstractions over the HAL layer.

pub mod si5351;

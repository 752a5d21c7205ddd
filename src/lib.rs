//! Synthesizer Panel Firmware Library
//!
//! This library provides the control core for an STM32G474-driven
//! `Si5351A` frequency synthesizer with a four-button front panel and a
//! Kenwood-style CAT serial link to a host computer.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Controller loop  │  Mode arbiter  │  CAT parser/dispatcher  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      CORE LAYER                              │
//! │  Control state  │  Mutators  │  Synthesizer frequency plan   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  Port traits  │  GPIO  │  USART  │  I2C  │  Si5351A          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single owner**: one `Controller` owns the control state; nothing
//!   touches it through statics
//! - **Type-driven design**: `Frequency` and `TuningStep` cannot hold
//!   out-of-range values
//! - **Silent rejection**: invalid requests change nothing and answer
//!   nothing
//! - **Functional core, imperative shell**: everything above the port
//!   traits runs on the host under test

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Port traits, plus STM32G474 implementations when `embedded` is on.
pub mod hal;

/// Peripheral Drivers
///
/// `Si5351A` clock generator driver.
#[cfg(feature = "embedded")]
pub mod drivers;

/// Panel Control Logic
///
/// Control state, mutators, mode arbitration and the main loop.
pub mod radio;

/// Communication Protocols
///
/// CAT line assembly, command parsing and responses.
pub mod protocol;

/// Synthesizer frequency planning
pub mod synth;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::drivers::si5351::{CrystalLoad, DriveStrength, Si5351};
    pub use crate::hal::gpio::{PanelButtons, TxEnable};
    pub use crate::hal::i2c::I2cBus;
    pub use crate::hal::uart::{cat_config, HostUart};
    pub use crate::hal::{HostLink, PanelInputs, SynthesizerPort, TxEnableOutput};
    pub use crate::radio::controller::Controller;
    pub use crate::radio::controls::Controls;
    pub use crate::radio::state::ControlState;

    // Common traits
    pub use embedded_hal::digital::{InputPin, OutputPin};

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}

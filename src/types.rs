//! Shared types used across the synthesizer panel firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::{DEFAULT_FREQUENCY_HZ, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ, STEP_TABLE_HZ};

/// Output frequency in Hertz with validation
///
/// A `Frequency` can only be built inside the tunable range
/// [`Frequency::MIN_HZ`, `Frequency::MAX_HZ`], so every value held by the
/// control state is already valid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Minimum supported frequency (8 MHz)
    pub const MIN_HZ: u32 = MIN_FREQUENCY_HZ;

    /// Maximum supported frequency (16 MHz)
    pub const MAX_HZ: u32 = MAX_FREQUENCY_HZ;

    /// Lowest tunable frequency
    pub const MIN: Self = Self(MIN_FREQUENCY_HZ);

    /// Highest tunable frequency
    pub const MAX: Self = Self(MAX_FREQUENCY_HZ);

    /// Frequency applied at boot
    pub const DEFAULT: Self = Self(DEFAULT_FREQUENCY_HZ);

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 1000
    }

    /// One step higher, or None if that would leave the range
    #[must_use]
    pub const fn step_up(self, step: TuningStep) -> Option<Self> {
        match self.0.checked_add(step.as_hz()) {
            Some(hz) => Self::from_hz(hz),
            None => None,
        }
    }

    /// One step lower, or None if that would leave the range
    #[must_use]
    pub const fn step_down(self, step: TuningStep) -> Option<Self> {
        match self.0.checked_sub(step.as_hz()) {
            Some(hz) => Self::from_hz(hz),
            None => None,
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Tuning step size
///
/// The variant order is the precision-mode order: each press of the
/// step button moves one variant down the list, wrapping from 1 kHz back
/// to 1 MHz. Precision mode and step size are one value, so they cannot
/// drift apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TuningStep {
    /// 1 MHz step (precision mode 0)
    #[default]
    MHz1,
    /// 100 kHz step (precision mode 1)
    KHz100,
    /// 10 kHz step (precision mode 2)
    KHz10,
    /// 1 kHz step (precision mode 3)
    KHz1,
}

impl TuningStep {
    /// Number of selectable step sizes
    pub const COUNT: u8 = 4;

    /// Get the step size in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        STEP_TABLE_HZ[self.precision_mode() as usize]
    }

    /// Precision-mode index (0..=3)
    #[must_use]
    pub const fn precision_mode(self) -> u8 {
        match self {
            Self::MHz1 => 0,
            Self::KHz100 => 1,
            Self::KHz10 => 2,
            Self::KHz1 => 3,
        }
    }

    /// Step for a precision-mode index, taken modulo [`Self::COUNT`]
    #[must_use]
    pub const fn from_precision_mode(mode: u8) -> Self {
        match mode % Self::COUNT {
            0 => Self::MHz1,
            1 => Self::KHz100,
            2 => Self::KHz10,
            _ => Self::KHz1,
        }
    }

    /// Cycle to the next finer step, wrapping 1 kHz back to 1 MHz
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_precision_mode(self.precision_mode() + 1)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TuningStep {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::MHz1 => defmt::write!(f, "1 MHz"),
            Self::KHz100 => defmt::write!(f, "100 kHz"),
            Self::KHz10 => defmt::write!(f, "10 kHz"),
            Self::KHz1 => defmt::write!(f, "1 kHz"),
        }
    }
}

/// Which input path currently has authority over the control state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Front-panel buttons are polled
    #[default]
    Manual,
    /// Host CAT commands are processed; buttons are not observed
    HostControl,
}

impl ControlMode {
    /// Mode selected by the level of the host-present signal
    #[must_use]
    pub const fn from_host_present(asserted: bool) -> Self {
        if asserted {
            Self::HostControl
        } else {
            Self::Manual
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ControlMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Manual => defmt::write!(f, "Manual"),
            Self::HostControl => defmt::write!(f, "HostControl"),
        }
    }
}

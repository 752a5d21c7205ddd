//! Si5351 Frequency Plan
//!
//! Computes PLL and multisynth settings for an output frequency. This
//! module is pure and testable on the host; the on-target driver only
//! writes what it produces.
//!
//! # Theory of Operation
//!
//! The Si5351 uses a two-stage frequency synthesis:
//! 1. PLL stage: FVCO = FXTAL × (a + b/c) where 15 ≤ a ≤ 90
//! 2. Multisynth stage: FOUT = FVCO / (d + e/f) where 4 ≤ d ≤ 1800
//!
//! PLL A is held at a fixed 800 MHz (integer multiplier 32 on a 25 MHz
//! crystal) and only the multisynth divider follows the output. CLK0 and
//! CLK1 share the divider; CLK1 is offset by 90°.

use crate::config::{PLL_VCO_HZ, QUADRATURE_PHASE_DEG, SI5351_XTAL_FREQ};
use crate::types::Frequency;

/// PLL parameters for frequency calculation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PllParams {
    /// Integer part (15-90)
    pub a: u32,
    /// Numerator (0 to c-1)
    pub b: u32,
    /// Denominator (1-1048575)
    pub c: u32,
}

impl PllParams {
    /// Minimum PLL multiplier
    pub const MIN_A: u32 = 15;
    /// Maximum PLL multiplier
    pub const MAX_A: u32 = 90;
    /// Maximum denominator (20 bits)
    pub const MAX_C: u32 = 1_048_575;

    /// Create integer PLL params (b=0, c=1)
    #[must_use]
    pub const fn integer(a: u32) -> Self {
        Self { a, b: 0, c: 1 }
    }

    /// Calculate the VCO frequency given crystal frequency
    #[must_use]
    pub fn vco_frequency(&self, xtal_hz: u64) -> u64 {
        // FVCO = FXTAL × (a + b/c)
        (xtal_hz * u64::from(self.a) * u64::from(self.c) + xtal_hz * u64::from(self.b))
            / u64::from(self.c)
    }

    /// Validate parameters are in range
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.a >= Self::MIN_A
            && self.a <= Self::MAX_A
            && self.c >= 1
            && self.c <= Self::MAX_C
            && self.b < self.c
    }

    /// Packed register block (8 bytes starting at the PLL base register)
    #[must_use]
    pub fn to_registers(&self) -> [u8; 8] {
        let (p1, p2, p3) = encode(self.a, self.b, self.c);
        pack(p1, p2, p3)
    }
}

/// Multisynth divider parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MsParams {
    /// Integer part (4, 6-1800)
    pub a: u32,
    /// Numerator
    pub b: u32,
    /// Denominator
    pub c: u32,
}

impl MsParams {
    /// Minimum integer divisor
    pub const MIN_A: u32 = 4;
    /// Maximum integer divisor
    pub const MAX_A: u32 = 1800;
    /// Maximum denominator (20 bits)
    pub const MAX_C: u32 = 1_048_575;

    /// Divider that brings `vco_hz` down to `target_hz`.
    ///
    /// The remainder is expressed over the largest 20-bit denominator.
    #[must_use]
    pub fn for_output(vco_hz: u64, target_hz: u64) -> Option<Self> {
        if target_hz == 0 {
            return None;
        }
        let a = u32::try_from(vco_hz / target_hz).ok()?;
        let remainder = vco_hz % target_hz;
        let c = Self::MAX_C;
        let b = u32::try_from(remainder * u64::from(c) / target_hz).ok()?;
        let ms = Self { a, b, c };
        ms.is_valid().then_some(ms)
    }

    /// Calculate output frequency given VCO frequency
    #[must_use]
    pub fn output_frequency(&self, vco_hz: u64) -> u64 {
        // FOUT = FVCO × c / (a × c + b)
        let divisor = u64::from(self.a) * u64::from(self.c) + u64::from(self.b);
        (vco_hz * u64::from(self.c)) / divisor
    }

    /// Validate parameters are in range
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        // Note: a=5 is not allowed
        let a_valid = self.a == 4 || (self.a >= 6 && self.a <= Self::MAX_A);
        let c_valid = self.c >= 1 && self.c <= Self::MAX_C;
        a_valid && c_valid && self.b < self.c
    }

    /// Check if the divider has no fractional part
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.b == 0
    }

    /// Packed register block (8 bytes starting at the multisynth base
    /// register, R divider fixed at 1)
    #[must_use]
    pub fn to_registers(&self) -> [u8; 8] {
        let (p1, p2, p3) = encode(self.a, self.b, self.c);
        pack(p1, p2, p3)
    }
}

/// Everything the driver writes for one output frequency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthPlan {
    /// PLL A settings
    pub pll: PllParams,
    /// Shared CLK0/CLK1 multisynth settings
    pub ms: MsParams,
    /// CLK1 phase offset register value (quarter VCO periods)
    pub quadrature_phase: u8,
}

impl SynthPlan {
    /// PLL multiplier that puts the VCO at [`PLL_VCO_HZ`]
    pub const PLL_MULTIPLIER: u32 = PLL_VCO_HZ / SI5351_XTAL_FREQ;

    /// Plan the outputs for `frequency`
    #[must_use]
    pub fn for_frequency(frequency: Frequency) -> Option<Self> {
        let pll = PllParams::integer(Self::PLL_MULTIPLIER);
        let vco = pll.vco_frequency(u64::from(SI5351_XTAL_FREQ));
        let target = u64::from(frequency.as_hz());
        let ms = MsParams::for_output(vco, target)?;

        // A 90° shift is one quarter output period, i.e. VCO/FOUT quarter
        // VCO periods; the register holds 7 bits.
        let quarter_periods =
            (vco * u64::from(QUADRATURE_PHASE_DEG) / 90 + target / 2) / target;
        let quadrature_phase = u8::try_from(quarter_periods).ok().filter(|p| *p <= 0x7F)?;

        Some(Self {
            pll,
            ms,
            quadrature_phase,
        })
    }

    /// Output frequency actually produced by this plan
    #[must_use]
    pub fn actual_frequency(&self) -> u64 {
        self.ms
            .output_frequency(self.pll.vco_frequency(u64::from(SI5351_XTAL_FREQ)))
    }
}

/// P1, P2, P3 from the datasheet:
/// P1 = 128 × a + floor(128 × b/c) - 512,
/// P2 = 128 × b - c × floor(128 × b/c), P3 = c
fn encode(a: u32, b: u32, c: u32) -> (u32, u32, u32) {
    let floor_128b_c = u32::try_from(128 * u64::from(b) / u64::from(c)).unwrap_or(0);
    let p1 = (128 * a + floor_128b_c).saturating_sub(512);
    let p2 = u32::try_from(128 * u64::from(b) - u64::from(c) * u64::from(floor_128b_c))
        .unwrap_or(0);
    (p1, p2, c)
}

#[allow(clippy::cast_possible_truncation)]
fn pack(p1: u32, p2: u32, p3: u32) -> [u8; 8] {
    [
        ((p3 >> 8) & 0xFF) as u8,
        (p3 & 0xFF) as u8,
        ((p1 >> 16) & 0x03) as u8,
        ((p1 >> 8) & 0xFF) as u8,
        (p1 & 0xFF) as u8,
        (((p3 >> 12) & 0xF0) | ((p2 >> 16) & 0x0F)) as u8,
        ((p2 >> 8) & 0xFF) as u8,
        (p2 & 0xFF) as u8,
    ]
}

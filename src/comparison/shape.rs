//! Per-entity hourly demand signal.
//!
//! A yield is the synthetic number of units one identifier sells in one hour
//! under one comparison variant:
//!
//! ```text
//! yield = max(0, round(shape(shifted_hour) * amplitude + noise * noise_amplitude + bias))
//! ```
//!
//! `shape` is the sum of three triangular peaks (morning, midday, evening).
//! `noise` is a bounded (±6) deterministic term derived from the identifier
//! hash and the shifted hour. Each variant has its own preset so the four
//! series differ in height, peak timing and baseline.

use super::Variant;
use crate::utils::format::round_half_up;

pub const HOURS_PER_DAY: u32 = 24;

/// Demo price applied to every unit when deriving sales totals.
pub const UNIT_PRICE: f64 = 19.99;

/// A triangular demand peak: `weight * max(0, 1 - |hour - center| / width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandPeak {
    pub center: f64,
    pub width: f64,
    pub weight: f64,
}

pub const DEMAND_PEAKS: [DemandPeak; 3] = [
    // morning
    DemandPeak {
        center: 9.0,
        width: 3.0,
        weight: 3.0,
    },
    // midday
    DemandPeak {
        center: 13.0,
        width: 3.0,
        weight: 5.0,
    },
    // evening
    DemandPeak {
        center: 19.0,
        width: 4.0,
        weight: 4.0,
    },
];

pub const NOISE_MULTIPLIER: u32 = 0x9E37_79B1;
pub const NOISE_MODULUS: u32 = 13;
pub const NOISE_OFFSET: i32 = 6;

/// Shape parameters for one comparison variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantShape {
    pub amplitude: f64,
    /// Added to the hour before evaluating the shape, wrapped into `0..24`.
    pub hour_shift: i32,
    pub noise_amplitude: f64,
    pub bias: f64,
    pub noise_salt: u32,
}

pub const CURRENT_SHAPE: VariantShape = VariantShape {
    amplitude: 1.0,
    hour_shift: 0,
    noise_amplitude: 0.5,
    bias: 0.0,
    noise_salt: 0,
};

pub const PRIOR_DAY_SHAPE: VariantShape = VariantShape {
    amplitude: 0.86,
    hour_shift: -1,
    noise_amplitude: 0.4,
    bias: -0.6,
    noise_salt: 0x5BD1_E995,
};

pub const PRIOR_WEEK_SHAPE: VariantShape = VariantShape {
    amplitude: 0.93,
    hour_shift: 1,
    noise_amplitude: 0.45,
    bias: 0.4,
    noise_salt: 0x27D4_EB2F,
};

pub const PRIOR_YEAR_SHAPE: VariantShape = VariantShape {
    amplitude: 0.72,
    hour_shift: -2,
    noise_amplitude: 0.3,
    bias: -1.2,
    noise_salt: 0x1656_67B1,
};

impl Variant {
    /// The shape preset for this variant.
    pub fn shape(self) -> VariantShape {
        match self {
            Self::Current => CURRENT_SHAPE,
            Self::PriorDay => PRIOR_DAY_SHAPE,
            Self::PriorWeek => PRIOR_WEEK_SHAPE,
            Self::PriorYear => PRIOR_YEAR_SHAPE,
        }
    }
}

/// Polynomial string hash, base 31, wrapping at 32 bits.
pub fn identifier_hash(identifier: &str) -> u32 {
    identifier
        .chars()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32))
}

/// Apply a signed shift to an hour, wrapping into `0..24`.
pub fn shifted_hour(hour: u32, shift: i32) -> u32 {
    (hour as i32 + shift).rem_euclid(HOURS_PER_DAY as i32) as u32
}

/// Unscaled tri-modal demand at `hour`.
pub fn demand_shape(hour: u32) -> f64 {
    let h = f64::from(hour);
    DEMAND_PEAKS
        .iter()
        .map(|peak| peak.weight * (1.0 - (h - peak.center).abs() / peak.width).max(0.0))
        .sum()
}

/// Deterministic pseudo-noise in `-6..=6`.
pub fn noise(hash: u32, hour: u32, salt: u32) -> i32 {
    let mixed = hash ^ hour.wrapping_mul(NOISE_MULTIPLIER) ^ salt;
    (mixed % NOISE_MODULUS) as i32 - NOISE_OFFSET
}

/// Units sold by `identifier` during `hour` under `variant`.
pub fn unit_yield(identifier: &str, hour: u32, variant: Variant) -> u32 {
    let preset = variant.shape();
    let hour = shifted_hour(hour, preset.hour_shift);
    let shape = demand_shape(hour) * preset.amplitude;
    let noise = f64::from(noise(identifier_hash(identifier), hour, preset.noise_salt))
        * preset.noise_amplitude;

    let value = round_half_up(shape + noise + preset.bias);
    if value <= 0.0 { 0 } else { value as u32 }
}

//! Hourly sales comparison across time windows.
//!
//! For the selected identifiers, sums the per-entity hourly yield (see
//! [`shape`]) into a 24-point series with one unit count per [`Variant`],
//! then reduces the series to per-variant unit and sales totals.
//!
//! Identifiers that are selected but not part of the catalog contribute
//! nothing. An empty selection produces an all-zero series.

pub mod shape;

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::format::round2;
pub use shape::{HOURS_PER_DAY, UNIT_PRICE};

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// A comparison time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Current,
    PriorDay,
    PriorWeek,
    PriorYear,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Current,
        Variant::PriorDay,
        Variant::PriorWeek,
        Variant::PriorYear,
    ];

    /// Human-readable label used for table headers and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::PriorDay => "Prior day",
            Self::PriorWeek => "Prior week",
            Self::PriorYear => "Prior year",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::PriorDay => write!(f, "prior-day"),
            Self::PriorWeek => write!(f, "prior-week"),
            Self::PriorYear => write!(f, "prior-year"),
        }
    }
}

// ---------------------------------------------------------------------------
// Series point and totals
// ---------------------------------------------------------------------------

/// Units sold during one hour of the day, per variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPoint {
    pub hour_label: String,
    pub current: u32,
    pub prior_day: u32,
    pub prior_week: u32,
    pub prior_year: u32,
}

impl ComparisonPoint {
    fn empty(hour: u32) -> Self {
        Self {
            hour_label: hour_label(hour),
            current: 0,
            prior_day: 0,
            prior_week: 0,
            prior_year: 0,
        }
    }

    /// Unit count for one variant.
    pub fn units(&self, variant: Variant) -> u32 {
        match variant {
            Variant::Current => self.current,
            Variant::PriorDay => self.prior_day,
            Variant::PriorWeek => self.prior_week,
            Variant::PriorYear => self.prior_year,
        }
    }

    fn add(&mut self, variant: Variant, units: u32) {
        let slot = match variant {
            Variant::Current => &mut self.current,
            Variant::PriorDay => &mut self.prior_day,
            Variant::PriorWeek => &mut self.prior_week,
            Variant::PriorYear => &mut self.prior_year,
        };
        *slot += units;
    }
}

/// Unit and sales totals for one variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantTotal {
    pub units_total: u64,
    pub sales_total: f64,
}

/// Per-variant reduction of a full comparison series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTotals {
    pub unit_price: f64,
    pub current: VariantTotal,
    pub prior_day: VariantTotal,
    pub prior_week: VariantTotal,
    pub prior_year: VariantTotal,
}

impl ComparisonTotals {
    /// Totals for one variant.
    pub fn get(&self, variant: Variant) -> VariantTotal {
        match variant {
            Variant::Current => self.current,
            Variant::PriorDay => self.prior_day,
            Variant::PriorWeek => self.prior_week,
            Variant::PriorYear => self.prior_year,
        }
    }

    /// Relative change of the current window against `baseline`.
    ///
    /// Returns `None` when the baseline sold nothing.
    pub fn change_vs(&self, baseline: Variant) -> Option<f64> {
        let base = self.get(baseline).units_total;
        if base == 0 {
            return None;
        }
        Some((self.current.units_total as f64 - base as f64) / base as f64)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute the hourly comparison series and totals at the demo unit price.
pub fn compute_comparison(
    all: &[String],
    selected: &BTreeSet<String>,
) -> (Vec<ComparisonPoint>, ComparisonTotals) {
    compute_comparison_priced(all, selected, UNIT_PRICE)
}

/// Compute the hourly comparison series and totals at `unit_price`.
pub fn compute_comparison_priced(
    all: &[String],
    selected: &BTreeSet<String>,
    unit_price: f64,
) -> (Vec<ComparisonPoint>, ComparisonTotals) {
    let known: HashSet<&str> = all.iter().map(String::as_str).collect();
    let members: Vec<&str> = selected
        .iter()
        .map(String::as_str)
        .filter(|id| known.contains(id))
        .collect();

    let points: Vec<ComparisonPoint> = (0..HOURS_PER_DAY)
        .map(|hour| {
            let mut point = ComparisonPoint::empty(hour);
            for id in &members {
                for variant in Variant::ALL {
                    point.add(variant, shape::unit_yield(id, hour, variant));
                }
            }
            point
        })
        .collect();

    let totals = summarize(&points, unit_price);
    (points, totals)
}

/// Reduce a comparison series to per-variant totals.
pub fn summarize(points: &[ComparisonPoint], unit_price: f64) -> ComparisonTotals {
    let total = |variant: Variant| {
        let units_total: u64 = points.iter().map(|p| u64::from(p.units(variant))).sum();
        VariantTotal {
            units_total,
            sales_total: round2(units_total as f64 * unit_price),
        }
    };

    ComparisonTotals {
        unit_price,
        current: total(Variant::Current),
        prior_day: total(Variant::PriorDay),
        prior_week: total(Variant::PriorWeek),
        prior_year: total(Variant::PriorYear),
    }
}

/// Label for an hour slot: `"00:00"` … `"23:00"`.
pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Daily trend series for the line chart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::format::round_half_up;

/// Daily gross sales for the 14 charted days.
pub const TREND_BASE_SALES: [u32; 14] = [
    92, 110, 98, 140, 130, 155, 148, 160, 172, 190, 175, 210, 205, 230,
];
/// Share of daily sales kept as profit.
pub const TREND_PROFIT_RATE: f64 = 0.13;
/// Average sale value used to back units out of daily sales.
pub const TREND_SALES_PER_UNIT: f64 = 18.0;

/// One charted day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: String,
    pub sales: u32,
    pub profit: u32,
    pub units: u32,
}

/// Which series the trend chart plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendMetric {
    #[default]
    Sales,
    NetProfit,
    Units,
}

impl TrendMetric {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::NetProfit => "Net Profit",
            Self::Units => "Units",
        }
    }

    /// The plotted value for this metric.
    pub fn value(self, point: &TrendPoint) -> u32 {
        match self {
            Self::Sales => point.sales,
            Self::NetProfit => point.profit,
            Self::Units => point.units,
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sales => write!(f, "sales"),
            Self::NetProfit => write!(f, "net-profit"),
            Self::Units => write!(f, "units"),
        }
    }
}

impl FromStr for TrendMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "net-profit" | "net_profit" | "netprofit" | "net profit" | "profit" => {
                Ok(Self::NetProfit)
            }
            "units" => Ok(Self::Units),
            other => anyhow::bail!("unknown trend metric '{other}' (expected sales, net-profit, units)"),
        }
    }
}

/// Build the 14-day trend: `D1` … `D14`.
pub fn daily_trend() -> Vec<TrendPoint> {
    TREND_BASE_SALES
        .iter()
        .enumerate()
        .map(|(i, &sales)| {
            let profit = round_half_up(f64::from(sales) * TREND_PROFIT_RATE) as u32;
            let units = (round_half_up(f64::from(sales) / TREND_SALES_PER_UNIT) as u32).max(1);
            TrendPoint {
                day: format!("D{}", i + 1),
                sales,
                profit,
                units,
            }
        })
        .collect()
}

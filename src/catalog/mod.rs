//! Synthetic product catalog.
//!
//! Derives product performance rows from their index with closed-form
//! arithmetic. There is no randomness and no I/O: generating the same count
//! twice yields identical rows.
//!
//! Constants live in [`templates`]; identifier encoding in [`identifier`].

pub mod identifier;
pub mod templates;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::format::{round2, round_half_up};
use templates::*;

// ---------------------------------------------------------------------------
// Catalog record
// ---------------------------------------------------------------------------

/// One synthetic product performance row.
///
/// Invariants upheld by [`record_at`]:
/// - `net_profit_per_unit == round2(net_profit / max(1, units_sold))`
/// - `orders_count <= units_sold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub identifier: String,
    pub stock_keeping_code: String,
    pub display_name: String,
    pub gross_sales: f64,
    pub platform_fees: f64,
    pub refund_amount: f64,
    pub net_profit: f64,
    pub net_profit_per_unit: f64,
    pub units_sold: u32,
    pub orders_count: u32,
    pub on_hand_inventory: u32,
    pub average_daily_velocity: u32,
    pub projected_stockout_date: String,
    pub popularity_rank: u64,
}

impl CatalogRecord {
    /// Whether the row made money after fees and refunds.
    pub fn is_profitable(&self) -> bool {
        self.net_profit >= 0.0
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate `count` catalog rows, indices `0..count`.
///
/// A zero count yields an empty catalog.
pub fn generate_catalog(count: usize) -> Vec<CatalogRecord> {
    (0..count).map(record_at).collect()
}

/// Derive the row for generation index `i`.
pub fn record_at(i: usize) -> CatalogRecord {
    let template = TEMPLATES[i % TEMPLATES.len()];

    let units_sold = UNITS_BASE + cycle_step(i, UNITS_STEP, UNITS_CYCLE) as u32;
    let orders_count = units_sold.saturating_sub((i % ORDERS_GAP_CYCLE) as u32).max(1);

    let gross_sales = round2(
        GROSS_SALES_BASE
            + i as f64 * GROSS_SALES_STEP
            + (i % GROSS_SALES_CYCLE) as f64 * GROSS_SALES_CYCLE_BONUS,
    );
    let fee_rate = FEE_RATE_BASE + (i % FEE_RATE_CYCLE) as f64 * FEE_RATE_STEP;
    let platform_fees = round2(gross_sales * fee_rate);
    let refund_amount = if i % REFUND_EVERY == 0 {
        round2(gross_sales * REFUND_RATE)
    } else {
        0.0
    };

    let margin_rate = MARGIN_RATE_BASE + (i % MARGIN_RATE_CYCLE) as f64 * MARGIN_RATE_STEP;
    let net_profit =
        round2((gross_sales - platform_fees - refund_amount) * margin_rate - FIXED_COST_PER_ROW);
    let net_profit_per_unit = round2(net_profit / f64::from(units_sold.max(1)));

    let on_hand_inventory =
        INVENTORY_BASE + cycle_step(i, INVENTORY_STEP, INVENTORY_CYCLE) as u32;
    let velocity_rate = VELOCITY_RATE_BASE + (i % VELOCITY_RATE_CYCLE) as f64 * VELOCITY_RATE_STEP;
    let average_daily_velocity = (round_half_up(f64::from(units_sold) * velocity_rate) as u32).max(1);

    CatalogRecord {
        identifier: identifier::identifier_for(i),
        stock_keeping_code: format!("{}-{:02}", template.base_code, i as u128 + 1),
        display_name: template.display_name.to_string(),
        gross_sales,
        platform_fees,
        refund_amount,
        net_profit,
        net_profit_per_unit,
        units_sold,
        orders_count,
        on_hand_inventory,
        average_daily_velocity,
        projected_stockout_date: stockout_date(i),
        popularity_rank: POPULARITY_RANK_BASE
            .saturating_add(index_u64(i).saturating_mul(POPULARITY_RANK_STEP)),
    }
}

/// Identifiers of a catalog, in catalog order.
pub fn identifiers(records: &[CatalogRecord]) -> Vec<String> {
    records.iter().map(|r| r.identifier.clone()).collect()
}

/// `(i * step) % cycle` without overflowing for large `i`.
fn cycle_step(i: usize, step: usize, cycle: usize) -> usize {
    (i % cycle) * step % cycle
}

fn index_u64(i: usize) -> u64 {
    u64::try_from(i).unwrap_or(u64::MAX)
}

fn stockout_date(i: usize) -> String {
    let day = STOCKOUT_BASE_DAY + (i % STOCKOUT_DAY_SPAN) as u32;
    NaiveDate::from_ymd_opt(STOCKOUT_YEAR, STOCKOUT_MONTH, day)
        .map(|date| date.format(STOCKOUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_matches_worked_example() {
        let row = record_at(0);
        assert_eq!(row.units_sold, 2);
        assert_eq!(row.orders_count, 2);
        assert_eq!(row.gross_sales, 45.0);
        assert_eq!(row.platform_fees, 14.4);
        assert_eq!(row.refund_amount, 8.1);
        assert_eq!(row.net_profit, 0.05);
        assert_eq!(row.net_profit_per_unit, 0.03);
        assert_eq!(row.on_hand_inventory, 10);
        assert_eq!(row.average_daily_velocity, 1);
        assert_eq!(row.popularity_rank, 1200);
        assert_eq!(row.projected_stockout_date, "Mar 12, 2026");
        assert_eq!(row.stock_keeping_code, "MG-WS-01");
        assert_eq!(row.display_name, "Magnelex Car Windshield Sunshade");
        assert_eq!(row.identifier, "B00005YC1S");
    }

    #[test]
    fn second_row_has_no_refund() {
        let row = record_at(1);
        assert_eq!(row.units_sold, 5);
        assert_eq!(row.orders_count, 4);
        assert_eq!(row.gross_sales, 63.3);
        assert_eq!(row.platform_fees, 22.15);
        assert_eq!(row.refund_amount, 0.0);
        assert_eq!(row.net_profit, 4.23);
        assert_eq!(row.net_profit_per_unit, 0.85);
        assert_eq!(row.stock_keeping_code, "MG-CWS-02");
    }

    #[test]
    fn seventh_row_carries_refund() {
        let row = record_at(7);
        assert_eq!(row.refund_amount, 21.26);
        assert_eq!(row.net_profit, 6.65);
    }

    #[test]
    fn stockout_day_wraps_after_span() {
        assert_eq!(record_at(17).projected_stockout_date, "Mar 29, 2026");
        assert_eq!(record_at(18).projected_stockout_date, "Mar 12, 2026");
    }

    #[test]
    fn templates_cycle() {
        let rows = generate_catalog(TEMPLATES.len() + 1);
        assert_eq!(rows[0].display_name, rows[TEMPLATES.len()].display_name);
        assert_ne!(rows[0].stock_keeping_code, rows[TEMPLATES.len()].stock_keeping_code);
    }

    #[test]
    fn large_indices_do_not_overflow() {
        let row = record_at(30_000_000);
        assert_eq!(row.popularity_rank, 1200 + 30_000_000 * 173);
        assert_eq!(row.units_sold, 2 + ((30_000_000 * 3) % 14) as u32);
        assert_eq!(row.identifier.len(), 10);

        let last = record_at(usize::MAX);
        assert_eq!(last.identifier.len(), 10);
        assert!(last.orders_count <= last.units_sold);
        assert!(last.stock_keeping_code.ends_with(&(usize::MAX as u128 + 1).to_string()));
    }

    #[test]
    fn cycle_step_matches_direct_product() {
        for i in 0..1_000 {
            assert_eq!(cycle_step(i, 37, 420), (i * 37) % 420);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_catalog(0).is_empty());
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(record_at(0)).unwrap();
        assert_eq!(json["netProfitPerUnit"], 0.03);
        assert_eq!(json["stockKeepingCode"], "MG-WS-01");
        assert!(json.get("net_profit").is_none());
    }
}

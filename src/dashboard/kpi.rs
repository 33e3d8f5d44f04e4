//! Headline KPI tiles computed from the catalog.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRecord;
use crate::utils::format::round2;

/// Share of gross sales attributed to advertising.
pub const AD_SPEND_RATE: f64 = 0.0963;

/// Totals and ratios shown in the KPI row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub sales: f64,
    pub units: u64,
    pub orders: u64,
    pub platform_fees: f64,
    pub ad_spend: f64,
    pub refund_cost: f64,
    /// Sales after fees and refunds.
    pub net_revenue: f64,
    pub net_profit: f64,
    /// `net_profit / sales`, 0 when nothing sold.
    pub margin: f64,
    /// `refund_cost / sales`, 0 when nothing sold.
    pub refund_rate: f64,
    /// `net_profit / (platform_fees + ad_spend + refund_cost)`, 0 when
    /// there is no cost.
    pub roi: f64,
}

/// Sum the catalog into a KPI summary.
pub fn summarize(records: &[CatalogRecord]) -> KpiSummary {
    let sales = round2(records.iter().map(|r| r.gross_sales).sum());
    let platform_fees = round2(records.iter().map(|r| r.platform_fees).sum());
    let refund_cost = round2(records.iter().map(|r| r.refund_amount).sum());
    let net_profit = round2(records.iter().map(|r| r.net_profit).sum());

    let ad_spend = round2(sales * AD_SPEND_RATE);

    let ratio = |part: f64| if sales > 0.0 { part / sales } else { 0.0 };
    let cost_basis = platform_fees + ad_spend + refund_cost;

    KpiSummary {
        sales,
        units: records.iter().map(|r| u64::from(r.units_sold)).sum(),
        orders: records.iter().map(|r| u64::from(r.orders_count)).sum(),
        platform_fees,
        ad_spend,
        refund_cost,
        net_revenue: round2(sales - platform_fees - refund_cost),
        net_profit,
        margin: ratio(net_profit),
        refund_rate: ratio(refund_cost),
        roi: if cost_basis > 0.0 {
            net_profit / cost_basis
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::generate_catalog;

    #[test]
    fn empty_catalog_has_zero_ratios() {
        let kpis = summarize(&[]);
        assert_eq!(kpis, KpiSummary::default());
    }

    #[test]
    fn single_row_totals() {
        let kpis = summarize(&generate_catalog(1));
        assert_eq!(kpis.sales, 45.0);
        assert_eq!(kpis.units, 2);
        assert_eq!(kpis.orders, 2);
        assert_eq!(kpis.platform_fees, 14.4);
        assert_eq!(kpis.refund_cost, 8.1);
        assert_eq!(kpis.net_revenue, 22.5);
        assert_eq!(kpis.net_profit, 0.05);
        assert_eq!(kpis.ad_spend, 4.33);
    }

    #[test]
    fn roi_is_profit_over_cost_basis() {
        let kpis = summarize(&generate_catalog(1));
        let expected = 0.05 / (14.4 + 4.33 + 8.1);
        assert!((kpis.roi - expected).abs() < 1e-9);

        let kpis = summarize(&generate_catalog(30));
        let cost = kpis.platform_fees + kpis.ad_spend + kpis.refund_cost;
        assert!((kpis.roi - kpis.net_profit / cost).abs() < 1e-9);
        assert!(kpis.roi > 0.0);
    }

    #[test]
    fn roi_is_zero_without_costs() {
        assert_eq!(summarize(&[]).roi, 0.0);
    }

    #[test]
    fn orders_never_exceed_units() {
        let kpis = summarize(&generate_catalog(30));
        assert!(kpis.orders <= kpis.units);
        assert!(kpis.margin > 0.0 && kpis.margin < 1.0);
        assert!(kpis.refund_rate > 0.0 && kpis.refund_rate < 1.0);
    }
}

//! Named constants for synthetic catalog generation.
//!
//! Every coefficient used by [`super::record_at`] lives here so it can be
//! inspected and tuned without touching the derivation itself.

/// A product name paired with the SKU stem used for its generated rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductTemplate {
    pub display_name: &'static str,
    pub base_code: &'static str,
}

/// Product lookup table, cycled by generation index.
pub const TEMPLATES: &[ProductTemplate] = &[
    ProductTemplate {
        display_name: "Magnelex Car Windshield Sunshade",
        base_code: "MG-WS",
    },
    ProductTemplate {
        display_name: "Windshield Sunshade for Tesla",
        base_code: "MG-CWS",
    },
    ProductTemplate {
        display_name: "Windshield Sunshade for Toyota",
        base_code: "MG-CWT",
    },
    ProductTemplate {
        display_name: "Microfiber Leather Steering Cover",
        base_code: "MG-SC",
    },
    ProductTemplate {
        display_name: "Magnetic Side Window Shade",
        base_code: "MG-SW",
    },
    ProductTemplate {
        display_name: "Car Seat Gap Filler",
        base_code: "MG-GF",
    },
];

/// Number of rows generated when no count is configured.
pub const DEFAULT_CATALOG_SIZE: usize = 30;

// Units and orders
pub const UNITS_BASE: u32 = 2;
pub const UNITS_STEP: usize = 3;
pub const UNITS_CYCLE: usize = 14;
pub const ORDERS_GAP_CYCLE: usize = 3;

// Sales, fees, refunds, profit
pub const GROSS_SALES_BASE: f64 = 45.0;
pub const GROSS_SALES_STEP: f64 = 7.3;
pub const GROSS_SALES_CYCLE: usize = 5;
pub const GROSS_SALES_CYCLE_BONUS: f64 = 11.0;
pub const FEE_RATE_BASE: f64 = 0.32;
pub const FEE_RATE_STEP: f64 = 0.03;
pub const FEE_RATE_CYCLE: usize = 4;
pub const REFUND_RATE: f64 = 0.18;
/// Every n-th row (starting with row 0) carries a refund.
pub const REFUND_EVERY: usize = 7;
pub const MARGIN_RATE_BASE: f64 = 0.18;
pub const MARGIN_RATE_STEP: f64 = 0.02;
pub const MARGIN_RATE_CYCLE: usize = 5;
pub const FIXED_COST_PER_ROW: f64 = 4.0;

// Inventory and velocity
pub const INVENTORY_BASE: u32 = 10;
pub const INVENTORY_STEP: usize = 37;
pub const INVENTORY_CYCLE: usize = 420;
pub const VELOCITY_RATE_BASE: f64 = 0.6;
pub const VELOCITY_RATE_STEP: f64 = 0.15;
pub const VELOCITY_RATE_CYCLE: usize = 4;

// Projected stockout date: fixed month and year, day varies by row.
pub const STOCKOUT_YEAR: i32 = 2026;
pub const STOCKOUT_MONTH: u32 = 3;
pub const STOCKOUT_BASE_DAY: u32 = 12;
pub const STOCKOUT_DAY_SPAN: usize = 18;
pub const STOCKOUT_DATE_FORMAT: &str = "%b %d, %Y";

// Best-seller rank
pub const POPULARITY_RANK_BASE: u64 = 1200;
pub const POPULARITY_RANK_STEP: u64 = 173;

// Identifier encoding
pub const IDENTIFIER_PREFIX: &str = "B0";
pub const IDENTIFIER_SEED: u64 = 10_000_000;
pub const IDENTIFIER_STRIDE: u64 = 7919;
pub const IDENTIFIER_BODY_LEN: usize = 8;

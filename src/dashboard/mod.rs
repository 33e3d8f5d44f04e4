//! Dashboard view model.
//!
//! Ties the generators together: a [`SelectionState`] (range, selected
//! identifiers, filter query) goes in, a fully computed [`DashboardView`]
//! comes out. Nothing is cached; every call recomputes from scratch.
//!
//! - [`kpi`]: headline totals and ratios
//! - [`trend`]: 14-day sales / profit / units series
//! - [`ranking`]: top performers by net profit

pub mod kpi;
pub mod ranking;
pub mod trend;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, CatalogRecord};
use crate::comparison::{self, ComparisonPoint, ComparisonTotals, UNIT_PRICE};
use crate::config::SellerdashConfig;
use crate::filter;
use kpi::KpiSummary;
use ranking::TopPerformer;
use trend::TrendPoint;

// ---------------------------------------------------------------------------
// Range key
// ---------------------------------------------------------------------------

/// Date range tabs shown above the product table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeKey {
    #[default]
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last-7-days", alias = "7d")]
    Last7Days,
    #[serde(rename = "wtd")]
    WeekToDate,
    #[serde(rename = "mtd")]
    MonthToDate,
    #[serde(rename = "last-30-days", alias = "30d")]
    Last30Days,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "custom")]
    Custom,
}

impl RangeKey {
    pub const ALL: [RangeKey; 8] = [
        RangeKey::Today,
        RangeKey::Yesterday,
        RangeKey::Last7Days,
        RangeKey::WeekToDate,
        RangeKey::MonthToDate,
        RangeKey::Last30Days,
        RangeKey::YearToDate,
        RangeKey::Custom,
    ];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7Days => "Last 7 Days",
            Self::WeekToDate => "WTD",
            Self::MonthToDate => "MTD",
            Self::Last30Days => "Last 30 Days",
            Self::YearToDate => "YTD",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::Yesterday => write!(f, "yesterday"),
            Self::Last7Days => write!(f, "last-7-days"),
            Self::WeekToDate => write!(f, "wtd"),
            Self::MonthToDate => write!(f, "mtd"),
            Self::Last30Days => write!(f, "last-30-days"),
            Self::YearToDate => write!(f, "ytd"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for RangeKey {
    type Err = anyhow::Error;

    /// Accepts the kebab-case key, the tab label, or a short alias
    /// (`7d`, `30d`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "last-7-days" | "7d" => Ok(Self::Last7Days),
            "wtd" | "week-to-date" => Ok(Self::WeekToDate),
            "mtd" | "month-to-date" => Ok(Self::MonthToDate),
            "last-30-days" | "30d" => Ok(Self::Last30Days),
            "ytd" | "year-to-date" => Ok(Self::YearToDate),
            "custom" => Ok(Self::Custom),
            _ => anyhow::bail!("unknown range '{s}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Which catalog identifiers feed the comparison chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every identifier in the catalog.
    #[default]
    All,
    /// An explicit subset; identifiers missing from the catalog are ignored.
    Only(BTreeSet<String>),
}

impl Selection {
    /// Build a selection from CLI input; an empty list means "all".
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        if set.is_empty() { Self::All } else { Self::Only(set) }
    }

    /// Expand against the catalog's identifiers.
    pub fn resolve(&self, all: &[String]) -> BTreeSet<String> {
        match self {
            Self::All => all.iter().cloned().collect(),
            Self::Only(ids) => ids.clone(),
        }
    }
}

/// Caller-held view state that drives recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub range: RangeKey,
    pub selected: Selection,
    pub query: String,
}

impl SelectionState {
    pub fn new(range: RangeKey) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_selection(mut self, selected: Selection) -> Self {
        self.selected = selected;
        self
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Tunables for building a view, usually taken from the loaded config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSettings {
    pub catalog_size: usize,
    pub unit_price: f64,
    pub top_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            catalog_size: catalog::templates::DEFAULT_CATALOG_SIZE,
            unit_price: UNIT_PRICE,
            top_limit: ranking::DEFAULT_TOP_LIMIT,
        }
    }
}

impl DashboardSettings {
    pub fn from_config(config: &SellerdashConfig) -> Self {
        Self {
            catalog_size: config.catalog.count,
            unit_price: config.comparison.unit_price,
            top_limit: config.display.top_limit,
        }
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Everything the page renders for one selection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub range: RangeKey,
    pub query: String,
    pub catalog_size: usize,
    pub selected_count: usize,
    pub kpis: KpiSummary,
    pub rows: Vec<CatalogRecord>,
    pub trend: Vec<TrendPoint>,
    pub top_performers: Vec<TopPerformer>,
    pub comparison: Vec<ComparisonPoint>,
    pub comparison_totals: ComparisonTotals,
}

/// Recompute the whole dashboard for `state`.
///
/// KPIs and the ranking cover the full catalog; only the product table is
/// narrowed by the filter query.
pub fn build_view(state: &SelectionState, settings: &DashboardSettings) -> DashboardView {
    let records = catalog::generate_catalog(settings.catalog_size);
    let all = catalog::identifiers(&records);
    let selected = state.selected.resolve(&all);
    let selected_count = selected.iter().filter(|id| all.contains(id)).count();

    let (comparison, comparison_totals) =
        comparison::compute_comparison_priced(&all, &selected, settings.unit_price);

    DashboardView {
        range: state.range,
        query: state.query.clone(),
        catalog_size: records.len(),
        selected_count,
        kpis: kpi::summarize(&records),
        rows: filter::filter_catalog(&records, &state.query),
        trend: trend::daily_trend(),
        top_performers: ranking::top_performers(&records, settings.top_limit),
        comparison,
        comparison_totals,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_parsing_accepts_labels_and_aliases() {
        assert_eq!("today".parse::<RangeKey>().unwrap(), RangeKey::Today);
        assert_eq!("Last 7 Days".parse::<RangeKey>().unwrap(), RangeKey::Last7Days);
        assert_eq!("30d".parse::<RangeKey>().unwrap(), RangeKey::Last30Days);
        assert_eq!("WTD".parse::<RangeKey>().unwrap(), RangeKey::WeekToDate);
        assert_eq!("year_to_date".parse::<RangeKey>().unwrap(), RangeKey::YearToDate);
        assert!("fortnight".parse::<RangeKey>().is_err());
    }

    #[test]
    fn range_display_round_trips_through_parse() {
        for key in RangeKey::ALL {
            assert_eq!(key.to_string().parse::<RangeKey>().unwrap(), key);
            assert_eq!(key.label().parse::<RangeKey>().unwrap(), key);
        }
    }

    #[test]
    fn empty_id_list_selects_all() {
        assert_eq!(Selection::from_ids(Vec::<String>::new()), Selection::All);
        let only = Selection::from_ids(["B00005YC1S"]);
        assert!(matches!(only, Selection::Only(ref s) if s.len() == 1));
    }

    #[test]
    fn default_view_covers_full_catalog() {
        let view = build_view(&SelectionState::default(), &DashboardSettings::default());
        assert_eq!(view.catalog_size, 30);
        assert_eq!(view.rows.len(), 30);
        assert_eq!(view.selected_count, 30);
        assert_eq!(view.comparison.len(), 24);
        assert_eq!(view.top_performers.len(), 5);
        assert!(view.comparison_totals.current.units_total > 0);
    }

    #[test]
    fn query_narrows_rows_only() {
        let state = SelectionState::new(RangeKey::MonthToDate).with_query("steering");
        let view = build_view(&state, &DashboardSettings::default());
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.kpis, kpi::summarize(&catalog::generate_catalog(30)));
        assert_eq!(view.range, RangeKey::MonthToDate);
    }

    #[test]
    fn unknown_selection_counts_nothing() {
        let state = SelectionState::default()
            .with_selection(Selection::from_ids(["NOPE", "B00005YC1S"]));
        let view = build_view(&state, &DashboardSettings::default());
        assert_eq!(view.selected_count, 1);
    }

    #[test]
    fn range_does_not_change_generated_rows() {
        let settings = DashboardSettings::default();
        let today = build_view(&SelectionState::new(RangeKey::Today), &settings);
        let ytd = build_view(&SelectionState::new(RangeKey::YearToDate), &settings);
        assert_eq!(today.rows, ytd.rows);
    }
}

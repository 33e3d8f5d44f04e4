//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `sellerdash dashboard`: KPI tiles, product table, trend, ranking, comparison
//! - `sellerdash catalog`: filterable product table
//! - `sellerdash compare`: hourly comparison across time windows
//! - `sellerdash trend`: 14-day trend for one metric
//! - `sellerdash top`: top performers by net profit
//! - `sellerdash health`: config sources and run log status
//! - `sellerdash config show|init|set|reset`: configuration management

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::analytics::logger::{self, RunLogEntry};
use crate::catalog::{self, CatalogRecord};
use crate::comparison::{self, ComparisonPoint, ComparisonTotals, Variant};
use crate::config::{self, SellerdashConfig};
use crate::dashboard::kpi::KpiSummary;
use crate::dashboard::ranking::{self, TopPerformer};
use crate::dashboard::trend::{self, TrendMetric, TrendPoint};
use crate::dashboard::{self, DashboardSettings, DashboardView, Selection, SelectionState};
use crate::filter;
use crate::utils::format::{format_money, format_number, format_pct, truncate};

pub use crate::config::OutputFormat;

/// Width of the longest bar drawn in table charts.
const BAR_WIDTH: usize = 32;

const CATALOG_CSV_HEADER: &str = "identifier,sku,product,gross_sales,units,orders,fees,refunds,net_profit,net_profit_per_unit,inventory,avg_units_per_day,stockout_date,bsr";

/// Color override for the `display.color` setting.
///
/// Only a disabled setting forces plain output; otherwise `colored` keeps
/// its own terminal and `NO_COLOR` detection.
pub fn color_override(enabled: bool) -> Option<bool> {
    (!enabled).then_some(false)
}

// ---------------------------------------------------------------------------
// sellerdash dashboard
// ---------------------------------------------------------------------------

/// Render the full dashboard for one selection state.
pub fn run_dashboard(
    state: &SelectionState,
    format: OutputFormat,
    cfg: &SellerdashConfig,
) -> Result<()> {
    let started = Instant::now();
    let view = dashboard::build_view(state, &DashboardSettings::from_config(cfg));

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Csv => print_catalog_csv(&view.rows),
        OutputFormat::Table => print_dashboard_table(&view, cfg.display.max_rows),
    }

    let entry = RunLogEntry::new("dashboard", view.rows.len(), elapsed_ms(started))
        .with_range(view.range)
        .with_selected(view.selected_count);
    logger::log_run(&cfg.logging, &entry);
    Ok(())
}

fn print_dashboard_table(view: &DashboardView, max_rows: usize) {
    println!(
        "{}",
        format!("Seller Dashboard — {}", view.range.label())
            .bold()
            .cyan()
    );
    println!("{}", "=".repeat(60));
    println!();

    print_kpi_tiles(&view.kpis);
    println!();

    let heading = if view.query.trim().is_empty() {
        format!("Products ({})", view.rows.len())
    } else {
        format!(
            "Products matching \"{}\" ({} of {})",
            view.query.trim(),
            view.rows.len(),
            view.catalog_size
        )
    };
    println!("{}", heading.bold().cyan());
    print_catalog_table(&view.rows, max_rows);
    println!();

    println!("{}", "Sales Trend".bold().cyan());
    print_trend_table(&view.trend, TrendMetric::Sales);
    println!();

    println!("{}", "Top Performers".bold().cyan());
    print_top_table(&view.top_performers);
    println!();

    println!(
        "{}",
        format!(
            "Hourly Comparison ({} of {} products)",
            view.selected_count, view.catalog_size
        )
        .bold()
        .cyan()
    );
    print_totals_table(&view.comparison_totals);
}

fn print_kpi_tiles(kpis: &KpiSummary) {
    let tiles = [
        ("Sales", format_money(kpis.sales), "Gross sales".to_string()),
        (
            "Units / Orders",
            format!("{} / {}", format_number(kpis.units), format_number(kpis.orders)),
            format!(
                "Units: {} • Orders: {}",
                format_number(kpis.units),
                format_number(kpis.orders)
            ),
        ),
        (
            "Platform Fees",
            format_money(kpis.platform_fees),
            "Referral & fulfillment fees".to_string(),
        ),
        (
            "Ad Spend",
            format_money(kpis.ad_spend),
            format!("ROI: {}", format_pct(kpis.roi)),
        ),
        (
            "Refund Cost",
            format_money(kpis.refund_cost),
            format!("Refund rate: {}", format_pct(kpis.refund_rate)),
        ),
        (
            "Net Revenue",
            format_money(kpis.net_revenue),
            "After fees & refunds".to_string(),
        ),
        (
            "Net Profit",
            format_money(kpis.net_profit),
            format!("Margin: {}", format_pct(kpis.margin)),
        ),
    ];

    for (label, value, sub) in tiles {
        println!("  {:<16} {:>14}  {}", label.bold(), value, sub.dimmed());
    }
}

// ---------------------------------------------------------------------------
// sellerdash catalog
// ---------------------------------------------------------------------------

/// Print the product table, optionally filtered.
pub fn run_catalog(
    count: usize,
    query: &str,
    format: OutputFormat,
    cfg: &SellerdashConfig,
) -> Result<()> {
    let started = Instant::now();
    let records = catalog::generate_catalog(count);
    let rows = filter::filter_catalog(&records, query);

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_catalog_csv(&rows),
        OutputFormat::Table => match no_match_notice(&rows, query) {
            Some(notice) => println!("{}", notice.yellow()),
            None => print_catalog_table(&rows, cfg.display.max_rows),
        },
    }

    logger::log_run(
        &cfg.logging,
        &RunLogEntry::new("catalog", rows.len(), elapsed_ms(started)),
    );
    Ok(())
}

fn print_catalog_table(rows: &[CatalogRecord], max_rows: usize) {
    println!(
        "  {:<28} {:<10} {:<10} {:>10} {:>5} {:>6} {:>9} {:>8} {:>10} {:>8} {:>5} {:>4} {:<12} {:>6}",
        "Product",
        "ASIN",
        "SKU",
        "Sales",
        "Units",
        "Orders",
        "Fees",
        "Refunds",
        "Net Profit",
        "NP/Unit",
        "Inv",
        "/Day",
        "Stockout",
        "BSR"
    );
    println!("  {}", "-".repeat(146));

    let limit = if max_rows == 0 { rows.len() } else { max_rows };
    for (i, r) in rows.iter().take(limit).enumerate() {
        let profit = format!("{:>10}", format_money(r.net_profit));
        let profit = if r.is_profitable() {
            profit.green()
        } else {
            profit.red()
        };
        let line = format!(
            "  {:<28} {:<10} {:<10} {:>10} {:>5} {:>6} {:>9} {:>8} {} {:>8} {:>5} {:>4} {:<12} {:>6}",
            truncate(&r.display_name, 28),
            r.identifier,
            r.stock_keeping_code,
            format_money(r.gross_sales),
            r.units_sold,
            r.orders_count,
            format_money(r.platform_fees),
            format_money(r.refund_amount),
            profit,
            format_money(r.net_profit_per_unit),
            r.on_hand_inventory,
            r.average_daily_velocity,
            r.projected_stockout_date,
            format_number(r.popularity_rank),
        );

        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }

    if rows.len() > limit {
        println!(
            "  {}",
            format!("… {} more rows (raise display.max_rows to see all)", rows.len() - limit)
                .dimmed()
        );
    }
}

/// Notice shown in place of an empty product table.
fn no_match_notice(rows: &[CatalogRecord], query: &str) -> Option<String> {
    rows.is_empty()
        .then(|| format!("No products match \"{}\".", query.trim()))
}

fn print_catalog_csv(rows: &[CatalogRecord]) {
    print!("{}", catalog_csv(rows));
}

fn catalog_csv(rows: &[CatalogRecord]) -> String {
    let mut out = String::from(CATALOG_CSV_HEADER);
    out.push('\n');
    for r in rows {
        out.push_str(&format!(
            "{},{},\"{}\",{:.2},{},{},{:.2},{:.2},{:.2},{:.2},{},{},\"{}\",{}\n",
            r.identifier,
            r.stock_keeping_code,
            r.display_name,
            r.gross_sales,
            r.units_sold,
            r.orders_count,
            r.platform_fees,
            r.refund_amount,
            r.net_profit,
            r.net_profit_per_unit,
            r.on_hand_inventory,
            r.average_daily_velocity,
            r.projected_stockout_date,
            r.popularity_rank,
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// sellerdash compare
// ---------------------------------------------------------------------------

/// Print the hourly comparison for the selected identifiers.
pub fn run_compare(
    selection: &Selection,
    format: OutputFormat,
    cfg: &SellerdashConfig,
) -> Result<()> {
    let started = Instant::now();
    let records = catalog::generate_catalog(cfg.catalog.count);
    let all = catalog::identifiers(&records);
    let selected = selection.resolve(&all);
    let selected_count = selected.iter().filter(|id| all.contains(id)).count();

    let (points, totals) =
        comparison::compute_comparison_priced(&all, &selected, cfg.comparison.unit_price);

    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct CompareOutput<'a> {
                points: &'a [ComparisonPoint],
                totals: &'a ComparisonTotals,
            }
            print_json(&CompareOutput {
                points: &points,
                totals: &totals,
            })?;
        }
        OutputFormat::Csv => print_comparison_csv(&points),
        OutputFormat::Table => {
            if selected_count == 0 {
                println!(
                    "{}",
                    "No known products selected; every hour is zero.".yellow()
                );
            }
            println!(
                "{}",
                format!("Hourly Units — {} of {} products", selected_count, all.len())
                    .bold()
                    .cyan()
            );
            print_comparison_table(&points);
            println!();
            print_totals_table(&totals);
        }
    }

    let entry = RunLogEntry::new("compare", points.len(), elapsed_ms(started))
        .with_selected(selected_count);
    logger::log_run(&cfg.logging, &entry);
    Ok(())
}

fn print_comparison_table(points: &[ComparisonPoint]) {
    print!("  {:<6}", "Hour");
    for variant in Variant::ALL {
        print!(" {:>11}", variant.label());
    }
    println!("  Current");
    println!("  {}", "-".repeat(6 + 12 * Variant::ALL.len() + 2 + BAR_WIDTH));

    let peak = points.iter().map(|p| p.current).max().unwrap_or(0);
    for p in points {
        print!("  {:<6}", p.hour_label);
        for variant in Variant::ALL {
            print!(" {:>11}", p.units(variant));
        }
        println!("  {}", bar(u64::from(p.current), u64::from(peak)).green());
    }
}

fn print_totals_table(totals: &ComparisonTotals) {
    println!(
        "  {:<12} {:>8} {:>12} {:>10}",
        "Window", "Units", "Sales", "Current Δ"
    );
    println!("  {}", "-".repeat(46));
    for variant in Variant::ALL {
        let t = totals.get(variant);
        let delta = match variant {
            Variant::Current => String::new(),
            baseline => totals
                .change_vs(baseline)
                .map(format_signed_pct)
                .unwrap_or_else(|| "n/a".to_string()),
        };
        println!(
            "  {:<12} {:>8} {:>12} {:>10}",
            variant.label(),
            format_number(t.units_total),
            format_money(t.sales_total),
            delta,
        );
    }
    println!(
        "  {}",
        format!("Sales at {} per unit", format_money(totals.unit_price)).dimmed()
    );
}

fn print_comparison_csv(points: &[ComparisonPoint]) {
    println!("hour,current,prior_day,prior_week,prior_year");
    for p in points {
        println!(
            "{},{},{},{},{}",
            p.hour_label, p.current, p.prior_day, p.prior_week, p.prior_year
        );
    }
}

// ---------------------------------------------------------------------------
// sellerdash trend
// ---------------------------------------------------------------------------

/// Print the 14-day trend for `metric`.
pub fn run_trend(metric: TrendMetric, format: OutputFormat, cfg: &SellerdashConfig) -> Result<()> {
    let started = Instant::now();
    let points = trend::daily_trend();

    match format {
        OutputFormat::Json => print_json(&points)?,
        OutputFormat::Csv => {
            println!("day,sales,profit,units");
            for p in &points {
                println!("{},{},{},{}", p.day, p.sales, p.profit, p.units);
            }
        }
        OutputFormat::Table => {
            println!(
                "{}",
                format!("Trend — {}", metric.label()).bold().cyan()
            );
            print_trend_table(&points, metric);
        }
    }

    logger::log_run(
        &cfg.logging,
        &RunLogEntry::new("trend", points.len(), elapsed_ms(started)),
    );
    Ok(())
}

fn print_trend_table(points: &[TrendPoint], metric: TrendMetric) {
    println!(
        "  {:<5} {:>7} {:>7} {:>6}  {}",
        "Day",
        "Sales",
        "Profit",
        "Units",
        metric.label()
    );
    println!("  {}", "-".repeat(30 + BAR_WIDTH));

    let peak = points.iter().map(|p| metric.value(p)).max().unwrap_or(0);
    for p in points {
        println!(
            "  {:<5} {:>7} {:>7} {:>6}  {}",
            p.day,
            format_money(f64::from(p.sales)),
            format_money(f64::from(p.profit)),
            p.units,
            bar(u64::from(metric.value(p)), u64::from(peak)).cyan(),
        );
    }
}

// ---------------------------------------------------------------------------
// sellerdash top
// ---------------------------------------------------------------------------

/// Print the top performers by net profit.
pub fn run_top(limit: Option<usize>, format: OutputFormat, cfg: &SellerdashConfig) -> Result<()> {
    let started = Instant::now();
    let records = catalog::generate_catalog(cfg.catalog.count);
    let top = ranking::top_performers(&records, limit.unwrap_or(cfg.display.top_limit));

    match format {
        OutputFormat::Json => print_json(&top)?,
        OutputFormat::Csv => {
            println!("rank,identifier,product,net_profit");
            for (i, t) in top.iter().enumerate() {
                println!(
                    "{},{},\"{}\",{:.2}",
                    i + 1,
                    t.identifier,
                    t.display_name,
                    t.net_profit
                );
            }
        }
        OutputFormat::Table => {
            println!("{}", "Top Performers by Net Profit".bold().cyan());
            print_top_table(&top);
        }
    }

    logger::log_run(
        &cfg.logging,
        &RunLogEntry::new("top", top.len(), elapsed_ms(started)),
    );
    Ok(())
}

fn print_top_table(top: &[TopPerformer]) {
    println!(
        "  {:>4} {:<8} {:<34} {:>10}",
        "Rank", "ASIN", "Product", "Net Profit"
    );
    println!("  {}", "-".repeat(60 + BAR_WIDTH));

    let peak = top.first().map(|t| t.net_profit.max(0.0)).unwrap_or(0.0);
    for (i, t) in top.iter().enumerate() {
        let width = if peak > 0.0 {
            ((t.net_profit.max(0.0) / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!(
            "  {:>4} {:<8} {:<34} {:>10}  {}",
            i + 1,
            t.label,
            truncate(&t.display_name, 34),
            format_money(t.net_profit),
            "█".repeat(width).green(),
        );
    }
}

// ---------------------------------------------------------------------------
// sellerdash health
// ---------------------------------------------------------------------------

/// Report config sources, effective settings and run log status.
pub fn run_health(cfg: &SellerdashConfig) -> Result<()> {
    println!("{}", "sellerdash Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.sellerdash/config.toml found"
        } else {
            "not found (run `sellerdash config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".sellerdash.toml found"
        } else {
            "none (optional)"
        },
    );
    print_health_item(
        "Defaults",
        true,
        &format!(
            "range {} / format {}",
            cfg.general.default_range, cfg.general.default_format
        ),
    );
    print_health_item(
        "Catalog",
        cfg.catalog.count > 0,
        &format!("{} rows", cfg.catalog.count),
    );
    print_health_item(
        "Unit price",
        true,
        &format_money(cfg.comparison.unit_price),
    );

    let log_path = logger::run_log_path(&cfg.logging);
    let log_exists = log_path.as_ref().map(|p| p.exists()).unwrap_or(false);
    let detail = if !cfg.logging.enabled {
        "disabled".to_string()
    } else if log_exists {
        format!("{} entries", logger::read_all_entries(&cfg.logging).len())
    } else {
        "no log file yet".to_string()
    };
    print_health_item("Run log", cfg.logging.enabled && log_exists, &detail);

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<16} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// sellerdash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective sellerdash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    for (label, exists) in [
        (
            "~/.sellerdash/config.toml",
            config::global_config_file().is_some_and(|p| p.exists()),
        ),
        (
            ".sellerdash.toml",
            config::project_config_file().is_some_and(|p| p.exists()),
        ),
    ] {
        if exists {
            println!("  {} {}", "✓".green(), label.dimmed());
        } else {
            println!("  {} {}", "·".dimmed(), format!("{label} (not found)").dimmed());
        }
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "SELLERDASH_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.sellerdash/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A horizontal bar scaled so that `peak` fills [`BAR_WIDTH`] cells.
fn bar(value: u64, peak: u64) -> String {
    if peak == 0 {
        return String::new();
    }
    let cells = (value * BAR_WIDTH as u64).div_ceil(peak) as usize;
    "█".repeat(cells.min(BAR_WIDTH))
}

fn format_signed_pct(ratio: f64) -> String {
    if ratio >= 0.0 {
        format!("▲ {}", format_pct(ratio))
    } else {
        format!("▼ {}", format_pct(-ratio))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use anyhow::Result;
use clap::{Parser, Subcommand};

use sellerdash::cli::{self, OutputFormat};
use sellerdash::config;
use sellerdash::dashboard::trend::TrendMetric;
use sellerdash::dashboard::{RangeKey, Selection, SelectionState};

#[derive(Debug, Parser)]
#[command(name = "sellerdash")]
#[command(about = "Seller dashboard metrics: catalog, KPIs, trends and hourly comparisons")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the full dashboard: KPI tiles, product table, trend, ranking and comparison
    Dashboard {
        /// Date range tab (today, yesterday, last-7-days, wtd, mtd, last-30-days, ytd, custom)
        #[arg(long)]
        range: Option<RangeKey>,
        /// Filter the product table by product name or ASIN
        #[arg(long, short, default_value = "")]
        query: String,
        /// ASINs feeding the comparison chart (repeatable; default: all)
        #[arg(long = "select", short = 's')]
        select: Vec<String>,
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print the product performance table
    Catalog {
        /// Number of rows to generate (default from config)
        #[arg(long)]
        count: Option<usize>,
        /// Filter by product name or ASIN
        #[arg(long, short, default_value = "")]
        query: String,
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Compare hourly units against prior day, week and year
    Compare {
        /// ASINs to include (repeatable; default: all)
        #[arg(long = "select", short = 's')]
        select: Vec<String>,
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the 14-day trend
    Trend {
        /// Metric to chart: sales, net-profit, units
        #[arg(long, default_value = "sales")]
        metric: TrendMetric,
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Rank products by net profit
    Top {
        /// Number of products to show (default from config)
        #[arg(long)]
        limit: Option<usize>,
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Check config sources and run log status
    Health,
    /// Manage sellerdash configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Create a default config file at ~/.sellerdash/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a configuration value (e.g. `catalog.count 12`)
    Set {
        /// Dotted key path, e.g. `comparison.unit_price`
        key: String,
        /// New value
        value: String,
    },
    /// Reset configuration to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let cfg = config::load();
    if let Some(color) = cli::color_override(cfg.display.color) {
        colored::control::set_override(color);
    }

    let output_format = |format: Option<String>| match format {
        Some(f) => OutputFormat::from_str_opt(Some(&f)),
        None => cfg.general.default_format,
    };

    match app.command {
        Commands::Dashboard {
            range,
            query,
            select,
            format,
        } => {
            let state = SelectionState::new(range.unwrap_or(cfg.general.default_range))
                .with_query(query)
                .with_selection(Selection::from_ids(select));
            cli::run_dashboard(&state, output_format(format), &cfg)
        }
        Commands::Catalog {
            count,
            query,
            format,
        } => {
            let count = count.map_or(cfg.catalog.count, |n| {
                n.min(config::schema::MAX_CATALOG_SIZE)
            });
            cli::run_catalog(count, &query, output_format(format), &cfg)
        }
        Commands::Compare { select, format } => {
            cli::run_compare(&Selection::from_ids(select), output_format(format), &cfg)
        }
        Commands::Trend { metric, format } => cli::run_trend(metric, output_format(format), &cfg),
        Commands::Top { limit, format } => cli::run_top(limit, output_format(format), &cfg),
        Commands::Health => cli::run_health(&cfg),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}

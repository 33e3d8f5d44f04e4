/// Configuration schema and defaults for sellerdash.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[general]`, `[catalog]`, `[comparison]`, `[display]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

use crate::catalog::templates::DEFAULT_CATALOG_SIZE;
use crate::comparison::UNIT_PRICE;
use crate::dashboard::RangeKey;
use crate::dashboard::ranking::DEFAULT_TOP_LIMIT;

/// Upper bound on generated rows; keeps a typo from generating millions.
pub const MAX_CATALOG_SIZE: usize = 10_000;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level sellerdash configuration.
///
/// Maps to `~/.sellerdash/config.toml` and `.sellerdash.toml`. Missing
/// sections and fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellerdashConfig {
    pub general: GeneralConfig,
    pub catalog: CatalogConfig,
    pub comparison: ComparisonConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

/// Output format for report commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse a format name, falling back to `Table` for unknown input.
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Range used when `--range` is not given.
    pub default_range: RangeKey,
    /// Format used when `--format` is not given.
    pub default_format: OutputFormat,
}

// ---------------------------------------------------------------------------
// [catalog]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Number of synthetic product rows to generate.
    pub count: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_CATALOG_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// [comparison]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Price applied per unit when deriving comparison sales totals.
    pub unit_price: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            unit_price: UNIT_PRICE,
        }
    }
}

// ---------------------------------------------------------------------------
// [display]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colorize table output.
    pub color: bool,
    /// Maximum product rows printed in table format (0 = no limit).
    pub max_rows: usize,
    /// Bars in the top-performer ranking.
    pub top_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            max_rows: 50,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether each report run is appended to the run log.
    pub enabled: bool,
    /// Path to the JSONL run log. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.sellerdash/run-log.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

impl SellerdashConfig {
    /// Clamp values that would make the generators misbehave.
    ///
    /// Applied after all layers are merged: the catalog size is capped at
    /// [`MAX_CATALOG_SIZE`], a negative or non-finite unit price falls back
    /// to the demo price, and the ranking shows at least one bar.
    pub fn normalize(&mut self) {
        self.catalog.count = self.catalog.count.min(MAX_CATALOG_SIZE);
        if !self.comparison.unit_price.is_finite() || self.comparison.unit_price < 0.0 {
            self.comparison.unit_price = UNIT_PRICE;
        }
        self.display.top_limit = self.display.top_limit.max(1);
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl SellerdashConfig {
    /// Annotated default config file, written by `sellerdash config init`.
    pub fn default_toml() -> String {
        r#"# sellerdash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (SELLERDASH_*)
#   2. Project config (.sellerdash.toml in current directory)
#   3. User global config (~/.sellerdash/config.toml)
#   4. Built-in defaults

[general]
default_range = "today"     # today | yesterday | last-7-days | wtd | mtd | last-30-days | ytd | custom
default_format = "table"    # table | json | csv

[catalog]
count = 30                  # Synthetic product rows to generate

[comparison]
unit_price = 19.99          # Price per unit for comparison sales totals

[display]
color = true
max_rows = 50               # 0 = print every row
top_limit = 5

[logging]
enabled = true
path = "~/.sellerdash/run-log.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Configuration system for sellerdash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::SellerdashConfig::default()`]
/// 2. **User global config**: `~/.sellerdash/config.toml`
/// 3. **Project local config**: `.sellerdash.toml` in the current working directory
/// 4. **Environment variables**: `SELLERDASH_*` overrides (highest precedence)
///
/// File layers are merged key by key: a project file that only sets
/// `catalog.count` keeps every other value from the global file. After all
/// layers are applied the config is normalized (see
/// [`SellerdashConfig::normalize`]).
///
/// # Usage
///
/// ```rust,ignore
/// use sellerdash::config;
///
/// let cfg = config::load();
/// let rows = sellerdash::catalog::generate_catalog(cfg.catalog.count);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::{OutputFormat, SellerdashConfig};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars, then normalizes.
pub fn load() -> SellerdashConfig {
    let layers: Vec<toml::Value> = [global_config_path(), project_config_path()]
        .into_iter()
        .filter_map(load_toml_file)
        .collect();

    let mut config = resolve_layers(&layers);
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config.normalize();
    config
}

/// Read a TOML file as an untyped value.
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is not valid TOML. A broken config file never stops a report
/// from rendering.
fn load_toml_file(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Fold file layers over the defaults.
///
/// If the merged document does not match the schema (e.g. a string where a
/// number belongs), the layers are applied one by one and any layer that
/// breaks the schema is skipped.
fn resolve_layers(layers: &[toml::Value]) -> SellerdashConfig {
    let Ok(mut merged) = toml::Value::try_from(SellerdashConfig::default()) else {
        return SellerdashConfig::default();
    };

    for layer in layers {
        let mut candidate = merged.clone();
        merge_values(&mut candidate, layer);
        if candidate.clone().try_into::<SellerdashConfig>().is_ok() {
            merged = candidate;
        }
    }

    merged.try_into().unwrap_or_default()
}

/// Recursively merge `overlay` into `base`. Tables merge per key; any other
/// value in the overlay replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.sellerdash/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sellerdash").join("config.toml"))
}

/// Path to the project local config: `.sellerdash.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".sellerdash.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~") {
        Some(rest) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            dirs::home_dir().map(|home| home.join(rest))
        }
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment overrides (highest precedence layer).
///
/// `lookup` resolves a variable name; [`load`] passes `std::env::var`.
///
/// Supported variables:
/// - `SELLERDASH_RANGE`: default range key (`today`, `7d`, `mtd`, ...)
/// - `SELLERDASH_FORMAT`: default output format (`table`, `json`, `csv`)
/// - `SELLERDASH_CATALOG_COUNT`: number of generated rows
/// - `SELLERDASH_UNIT_PRICE`: comparison unit price
/// - `SELLERDASH_COLOR`: colorize tables (`1`/`true`/`yes`/`on`)
/// - `SELLERDASH_LOG`: enable the run log (`1`/`true`/`yes`/`on`)
fn apply_env_overrides<F>(config: &mut SellerdashConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("SELLERDASH_RANGE")
        && let Ok(range) = val.parse()
    {
        config.general.default_range = range;
    }
    if let Some(val) = lookup("SELLERDASH_FORMAT")
        && !val.trim().is_empty()
    {
        config.general.default_format = OutputFormat::from_str_opt(Some(&val));
    }
    if let Some(val) = lookup("SELLERDASH_CATALOG_COUNT")
        && let Ok(count) = val.trim().parse::<usize>()
    {
        config.catalog.count = count;
    }
    if let Some(val) = lookup("SELLERDASH_UNIT_PRICE")
        && let Ok(price) = val.trim().parse::<f64>()
    {
        config.comparison.unit_price = price;
    }
    if let Some(val) = lookup("SELLERDASH_COLOR") {
        config.display.color = is_truthy(&val);
    }
    if let Some(val) = lookup("SELLERDASH_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.sellerdash/config.toml`.
///
/// Returns an error if the file already exists, unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config_file(&path, &SellerdashConfig::default_toml())?;
    Ok(path)
}

/// Set one dotted key (e.g. `catalog.count`) in the global config file.
///
/// Starts from the existing file, or from the defaults if there is none.
/// The updated document must still match the schema, otherwise nothing is
/// written.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::try_from(SellerdashConfig::default())
            .context("failed to serialize default config")?
    };

    set_toml_value(&mut root, key, value)?;

    root.clone()
        .try_into::<SellerdashConfig>()
        .with_context(|| format!("invalid value '{value}' for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    write_config_file(&path, &output)
}

fn write_config_file(path: &std::path::Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.sellerdash/ directory")?;
    }
    fs::write(path, content).context("failed to write config file")
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The new value takes the type of the value it replaces. Only keys that
/// already exist can be set.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted, e.g. 'catalog.count' (got '{key}')");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_) | toml::Value::Float(_)) => parse_number(key, raw_value)?,
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("config key not found: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Parse a numeric config value. Integer and float keys are interchangeable:
/// whole numbers become TOML integers, anything else a float. Schema
/// validation rejects a float where an integer field belongs.
fn parse_number(key: &str, raw_value: &str) -> Result<toml::Value> {
    let trimmed = raw_value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(toml::Value::Integer(n));
    }
    let f: f64 = trimmed
        .parse()
        .with_context(|| format!("expected number for '{key}', got '{raw_value}'"))?;
    Ok(toml::Value::Float(f))
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::RangeKey;

    fn layer(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn no_layers_gives_defaults() {
        assert_eq!(resolve_layers(&[]), SellerdashConfig::default());
    }

    #[test]
    fn later_layers_override_per_key() {
        let global = layer(
            r#"
[catalog]
count = 12

[display]
top_limit = 3
"#,
        );
        let project = layer(
            r#"
[catalog]
count = 8
"#,
        );
        let config = resolve_layers(&[global, project]);
        assert_eq!(config.catalog.count, 8);
        assert_eq!(config.display.top_limit, 3);
        assert_eq!(config.comparison.unit_price, 19.99);
    }

    #[test]
    fn layer_breaking_schema_is_skipped() {
        let good = layer("[catalog]\ncount = 12\n");
        let bad = layer("[catalog]\ncount = \"many\"\n");
        let config = resolve_layers(&[good, bad]);
        assert_eq!(config.catalog.count, 12);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = SellerdashConfig::default();
        apply_env_overrides(&mut config, |name| match name {
            "SELLERDASH_RANGE" => Some("Last 7 Days".to_string()),
            "SELLERDASH_FORMAT" => Some("csv".to_string()),
            "SELLERDASH_CATALOG_COUNT" => Some("7".to_string()),
            "SELLERDASH_UNIT_PRICE" => Some("9.5".to_string()),
            "SELLERDASH_COLOR" => Some("off".to_string()),
            "SELLERDASH_LOG" => Some("0".to_string()),
            _ => None,
        });

        assert_eq!(config.general.default_range, RangeKey::Last7Days);
        assert_eq!(config.general.default_format, OutputFormat::Csv);
        assert_eq!(config.catalog.count, 7);
        assert_eq!(config.comparison.unit_price, 9.5);
        assert!(!config.display.color);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut config = SellerdashConfig::default();
        apply_env_overrides(&mut config, |name| match name {
            "SELLERDASH_RANGE" => Some("fortnight".to_string()),
            "SELLERDASH_CATALOG_COUNT" => Some("lots".to_string()),
            _ => None,
        });
        assert_eq!(config, SellerdashConfig::default());
    }

    #[test]
    fn is_truthy_accepts_variants() {
        for yes in ["1", "true", "TRUE", "yes", "on", " On "] {
            assert!(is_truthy(yes), "{yes}");
        }
        for no in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(no), "{no}");
        }
    }

    #[test]
    fn set_toml_value_keeps_types() {
        let mut root = toml::Value::try_from(SellerdashConfig::default()).unwrap();
        set_toml_value(&mut root, "catalog.count", "12").unwrap();
        set_toml_value(&mut root, "comparison.unit_price", "24.5").unwrap();
        set_toml_value(&mut root, "display.color", "no").unwrap();
        set_toml_value(&mut root, "general.default_range", "mtd").unwrap();

        let config: SellerdashConfig = root.try_into().unwrap();
        assert_eq!(config.catalog.count, 12);
        assert_eq!(config.comparison.unit_price, 24.5);
        assert!(!config.display.color);
        assert_eq!(config.general.default_range, RangeKey::MonthToDate);
    }

    #[test]
    fn set_toml_value_rejects_bad_input() {
        let mut root = toml::Value::try_from(SellerdashConfig::default()).unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "1").is_err());
        assert!(set_toml_value(&mut root, "catalog.count", "many").is_err());
        assert!(set_toml_value(&mut root, "count", "1").is_err());
        assert!(set_toml_value(&mut root, "catalog.size", "1").is_err());
    }

    #[test]
    fn set_toml_value_accepts_floats_over_integer_values() {
        let mut root = layer("[comparison]\nunit_price = 20\n\n[catalog]\ncount = 12\n");
        set_toml_value(&mut root, "comparison.unit_price", "19.5").unwrap();
        set_toml_value(&mut root, "catalog.count", "8").unwrap();

        let config: SellerdashConfig = root.try_into().unwrap();
        assert_eq!(config.comparison.unit_price, 19.5);
        assert_eq!(config.catalog.count, 8);
    }

    #[test]
    fn whole_number_price_still_loads_as_float() {
        let mut root = toml::Value::try_from(SellerdashConfig::default()).unwrap();
        set_toml_value(&mut root, "comparison.unit_price", "20").unwrap();
        let config: SellerdashConfig = root.try_into().unwrap();
        assert_eq!(config.comparison.unit_price, 20.0);
    }

    #[test]
    fn fractional_count_fails_schema_validation() {
        let mut root = toml::Value::try_from(SellerdashConfig::default()).unwrap();
        set_toml_value(&mut root, "catalog.count", "12.5").unwrap();
        assert!(root.try_into::<SellerdashConfig>().is_err());
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home("/tmp/run.jsonl"),
            Some(PathBuf::from("/tmp/run.jsonl"))
        );
    }

    #[test]
    fn show_effective_config_round_trips() {
        let toml_str = show_effective_config().unwrap();
        let _: SellerdashConfig = toml::from_str(&toml_str).unwrap();
    }
}

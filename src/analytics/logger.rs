use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::expand_home;
use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Run log entry (JSONL)
// ---------------------------------------------------------------------------

/// One line in the run log (`~/.sellerdash/run-log.jsonl` by default).
///
/// Records which report was rendered, for which selection, and how long the
/// recomputation took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogEntry {
    pub timestamp: String,
    /// Subcommand name: `"dashboard"`, `"catalog"`, `"compare"`, ...
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub range: Option<String>,
    /// Rows (or points) in the rendered result.
    pub rows: usize,
    /// Identifiers that fed the comparison, when one was computed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub selected: Option<usize>,
    pub duration_ms: u64,
}

impl RunLogEntry {
    pub fn new(command: &str, rows: usize, duration_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command: command.to_string(),
            range: None,
            rows,
            selected: None,
            duration_ms,
        }
    }

    pub fn with_range(mut self, range: impl ToString) -> Self {
        self.range = Some(range.to_string());
        self
    }

    pub fn with_selected(mut self, selected: usize) -> Self {
        self.selected = Some(selected);
        self
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append an entry to the configured run log.
///
/// Best-effort: disabled logging, a missing home directory or a write
/// failure are all silently ignored.
pub fn log_run(config: &LoggingConfig, entry: &RunLogEntry) {
    if !config.enabled {
        return;
    }
    if let Some(path) = run_log_path(config) {
        let _ = append_entry(&path, entry);
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read every entry from the configured run log, skipping malformed lines.
pub fn read_all_entries(config: &LoggingConfig) -> Vec<RunLogEntry> {
    run_log_path(config)
        .map(|path| read_entries_from(&path))
        .unwrap_or_default()
}

/// Read entries from a specific file. Missing files read as empty.
pub fn read_entries_from(path: &Path) -> Vec<RunLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RunLogEntry>(&line).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Append one JSON line to `path`, creating parent directories as needed.
pub fn append_entry(path: &Path, entry: &RunLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Resolved path of the run log.
pub fn run_log_path(config: &LoggingConfig) -> Option<PathBuf> {
    expand_home(&config.path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

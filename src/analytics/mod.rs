//! Trim event log — one JSON line per trim, for later inspection.
//!
//! Records what was trimmed and how much it shrank, appended to
//! `~/.mdtrim/trim-log.jsonl` (or wherever `logging.path` points). Logging
//! is best-effort: a missing home directory or a full disk must never fail
//! the trim itself.

use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Trim log entry (JSONL analytics)
// ---------------------------------------------------------------------------

/// A single entry in the trim event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrimEvent {
    pub timestamp: String,
    /// What was trimmed: a file path or `"<stdin>"`.
    pub source: String,
    pub bytes_in: usize,
    pub bytes_out: usize,
    /// Percentage of bytes removed (0.0–100.0).
    pub removed_pct: f64,
    /// Whether trimming changed the text at all.
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Record one trim outcome. Does nothing when logging is disabled; I/O
/// errors are swallowed.
pub fn log_trim_event(
    config: &LoggingConfig,
    source: &str,
    bytes_in: usize,
    bytes_out: usize,
    changed: bool,
) {
    if !config.enabled {
        return;
    }

    let removed_pct = if bytes_in == 0 {
        0.0
    } else {
        (bytes_in.saturating_sub(bytes_out) as f64 / bytes_in as f64) * 100.0
    };

    let event = TrimEvent {
        timestamp: Utc::now().to_rfc3339(),
        source: source.to_string(),
        bytes_in,
        bytes_out,
        removed_pct,
        changed,
    };

    let _ = append_event(config, &event);
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_event(config: &LoggingConfig, event: &TrimEvent) -> Result<()> {
    let Some(path) = log_path(config) else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(event)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Resolve the configured log path, expanding a leading `~`.
pub fn log_path(config: &LoggingConfig) -> Option<PathBuf> {
    let path = &config.path;
    if let Some(rest) = path.strip_prefix("~/") {
        return dirs::home_dir().map(|home| home.join(rest));
    }
    if path == "~" {
        return dirs::home_dir();
    }
    Some(PathBuf::from(path))
}

//! Command-line surface: `mdtrim fmt`, `mdtrim check`, `mdtrim config`.
//!
//! Thin orchestration over the trim engine and the config system. Commands
//! print with color for terminals; everything they do is equally available
//! as library calls.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics;
use crate::config;
use crate::trim::trim_text;

// ---------------------------------------------------------------------------
// mdtrim fmt
// ---------------------------------------------------------------------------

/// Trim files in place (`--write`) or print the trimmed text to stdout.
///
/// With no files, reads stdin and writes the result to stdout — the
/// pipe-friendly mode: `cat note.md | mdtrim fmt`.
pub fn run_fmt(files: &[PathBuf], write: bool) -> Result<()> {
    let cfg = config::load();

    if files.is_empty() {
        let input = read_stdin()?;
        let trimmed = trim_text(&input, &cfg.trim);
        analytics::log_trim_event(
            &cfg.logging,
            "<stdin>",
            input.len(),
            trimmed.len(),
            trimmed != input,
        );
        print!("{trimmed}");
        return Ok(());
    }

    for path in files {
        let input = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let trimmed = trim_text(&input, &cfg.trim);
        let changed = trimmed != input;

        analytics::log_trim_event(
            &cfg.logging,
            &path.display().to_string(),
            input.len(),
            trimmed.len(),
            changed,
        );

        if !write {
            print!("{trimmed}");
            continue;
        }

        if changed {
            fs::write(path, &trimmed)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} {} ({})",
                "✓".green().bold(),
                path.display(),
                shrink_label(input.len(), trimmed.len()).dimmed()
            );
        } else {
            println!(
                "{} {} {}",
                "·".dimmed(),
                path.display(),
                "unchanged".dimmed()
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// mdtrim check
// ---------------------------------------------------------------------------

/// List files whose whitespace is not clean, without touching them.
///
/// Errors (and so exits nonzero) when anything would change, which makes it
/// usable as a CI gate or pre-commit hook.
pub fn run_check(files: &[PathBuf]) -> Result<()> {
    let cfg = config::load();

    if files.is_empty() {
        let input = read_stdin()?;
        if trim_text(&input, &cfg.trim) != input {
            anyhow::bail!("stdin would be trimmed");
        }
        return Ok(());
    }

    let mut dirty = 0usize;
    for path in files {
        let input = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let trimmed = trim_text(&input, &cfg.trim);

        if trimmed != input {
            dirty += 1;
            println!(
                "{} {} ({})",
                "✗".red().bold(),
                path.display(),
                shrink_label(input.len(), trimmed.len()).dimmed()
            );
        } else {
            println!("{} {}", "✓".green(), path.display());
        }
    }

    if dirty > 0 {
        anyhow::bail!("{} of {} file(s) would be trimmed", dirty, files.len());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// mdtrim config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective mdtrim Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    // Show source info
    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.mdtrim/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.mdtrim/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".mdtrim.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".mdtrim.toml (not found)".dimmed());
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "MDTRIM_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.mdtrim/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!(
        "  {}",
        "Edit the file to customize trimming behavior.".dimmed()
    );
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

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}

/// Human label for how much a trim removed, e.g. `-1,204 bytes`.
fn shrink_label(before: usize, after: usize) -> String {
    format!("-{} bytes", format_number(before.saturating_sub(after)))
}

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

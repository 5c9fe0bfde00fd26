/// Configuration system for mdtrim.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::Config::default()`]
/// 2. **User global config** — `~/.mdtrim/config.toml`
/// 3. **Project local config** — `.mdtrim.toml` in the current working directory
/// 4. **Environment variables** — `MDTRIM_*` overrides (highest precedence)
///
/// Later layers override earlier ones. Missing sections in a TOML file fall
/// back to the previous layer's values, and a malformed file is skipped with
/// a warning on stderr so a broken config can never block a trim.
///
/// # Usage
///
/// ```rust,ignore
/// use mdtrim::config;
///
/// let cfg = config::load();
/// if cfg.trim.trim_on_save {
///     // ...
/// }
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::{Config, TrimSettings};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved mdtrim configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for all modules that need
/// configuration.
pub fn load() -> Config {
    let mut config = Config::default();

    // Layer 2: user global config (~/.mdtrim/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        merge_config(&mut config, &global);
    }

    // Layer 3: project local config (.mdtrim.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        merge_config(&mut config, &project);
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. A file that exists but fails to parse is worth a
/// warning; a missing file is the normal case and stays quiet.
fn load_toml_file(path: Option<PathBuf>) -> Option<Config> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("[mdtrim] ignoring {}: {err}", path.display());
            None
        }
    }
}

/// Merge a loaded config layer into the base config.
///
/// The overlay fully replaces the base. This works because each TOML file is
/// deserialized with defaults filled in, so only explicitly-set values
/// differ from defaults — and those are the ones we want to apply.
fn merge_config(base: &mut Config, overlay: &Config) {
    *base = overlay.clone();
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.mdtrim/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mdtrim").join("config.toml"))
}

/// Path to the project local config: `.mdtrim.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".mdtrim.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `MDTRIM_TRIM_ON_SAVE` — trim on save (`1`/`true`/`yes`/`on`)
/// - `MDTRIM_AUTO_TRIM_DOCUMENT` — trim after an idle pause
/// - `MDTRIM_AUTO_TRIM_TIMEOUT` — idle pause in seconds
/// - `MDTRIM_PRESERVE_CODE_BLOCKS` — protect code spans
/// - `MDTRIM_PRESERVE_INDENTED_LISTS` — protect list indentation
/// - `MDTRIM_TRAILING_LINES_KEEP_MAX` — line endings kept at document end
/// - `MDTRIM_LOGGING` — trim event logging
fn apply_env_overrides(config: &mut Config) {
    if let Ok(val) = std::env::var("MDTRIM_TRIM_ON_SAVE") {
        config.trim.trim_on_save = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("MDTRIM_AUTO_TRIM_DOCUMENT") {
        config.trim.auto_trim_document = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("MDTRIM_AUTO_TRIM_TIMEOUT")
        && let Ok(secs) = val.parse::<f64>()
        && secs.is_finite()
        && secs >= 0.0
    {
        config.trim.auto_trim_timeout = secs;
    }
    if let Ok(val) = std::env::var("MDTRIM_PRESERVE_CODE_BLOCKS") {
        config.trim.preserve_code_blocks = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("MDTRIM_PRESERVE_INDENTED_LISTS") {
        config.trim.preserve_indented_lists = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("MDTRIM_TRAILING_LINES_KEEP_MAX")
        && let Ok(count) = val.parse::<usize>()
    {
        config.trim.trailing_lines_keep_max = count;
    }
    if let Ok(val) = std::env::var("MDTRIM_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.mdtrim/config.toml`.
///
/// Creates the `~/.mdtrim/` directory if it doesn't exist. Returns an error
/// if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.mdtrim/ directory")?;
    }

    fs::write(&path, Config::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// The value is validated against the schema type of `key` before anything
/// is written, so a bad value leaves the file exactly as it was. Keys are
/// dotted paths like `trim.TrimOnSave` or `logging.enabled`.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let new_value = parse_setting_value(key, value)?;
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        let defaults = toml::to_string_pretty(&Config::default())
            .context("failed to serialize default config")?;
        toml::from_str(&defaults).context("failed to parse serialized defaults")?
    };

    insert_toml_value(&mut root, key, new_value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Parse and validate a raw CLI value against the schema type of `key`.
///
/// The key decides the expected type, not whatever happens to be stored in
/// the file, so `AutoTrimTimeout = "soon"` can never sneak into the config.
fn parse_setting_value(key: &str, raw: &str) -> Result<toml::Value> {
    match key {
        "trim.AutoTrimTimeout" => {
            let secs: f64 = raw
                .parse()
                .ok()
                .filter(|s: &f64| s.is_finite() && *s >= 0.0)
                .with_context(|| {
                    format!("expected a non-negative number of seconds for '{key}', got '{raw}'")
                })?;
            Ok(toml::Value::Float(secs))
        }
        "trim.TrailingLinesKeepMax" => {
            let count: i64 = raw
                .parse::<usize>()
                .map(|n| n as i64)
                .ok()
                .with_context(|| {
                    format!("expected a non-negative integer for '{key}', got '{raw}'")
                })?;
            Ok(toml::Value::Integer(count))
        }
        "logging.path" => Ok(toml::Value::String(raw.to_string())),
        _ if is_bool_setting(key) => Ok(toml::Value::Boolean(parse_bool(key, raw)?)),
        _ => anyhow::bail!("unknown config key: '{key}'"),
    }
}

/// Whether `key` names one of the boolean settings.
fn is_bool_setting(key: &str) -> bool {
    matches!(
        key,
        "trim.TrimOnSave"
            | "trim.AutoTrimDocument"
            | "trim.PreserveCodeBlocks"
            | "trim.PreserveIndentedLists"
            | "trim.ConvertNonBreakingSpaces"
            | "trim.TrimTrailingSpaces"
            | "trim.TrimLeadingSpaces"
            | "trim.TrimMultipleSpaces"
            | "trim.TrimTrailingTabs"
            | "trim.TrimLeadingTabs"
            | "trim.TrimMultipleTabs"
            | "trim.TrimTrailingLines"
            | "trim.TrimLeadingLines"
            | "trim.TrimMultipleLines"
            | "logging.enabled"
    )
}

/// Parse a boolean CLI value. Accepts the usual truthy and falsy spellings;
/// anything else is an error rather than a silent `false`.
fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    if is_truthy(raw) {
        return Ok(true);
    }
    if matches!(
        raw.to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    ) {
        return Ok(false);
    }
    anyhow::bail!("expected a boolean for '{key}', got '{raw}'")
}

/// Insert a validated value at a `section.key` path, creating the section
/// table if the file didn't have one yet.
fn insert_toml_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (section, leaf) = key
        .split_once('.')
        .with_context(|| format!("expected a section.key path, got '{key}'"))?;

    let table = root
        .as_table_mut()
        .context("config root is not a TOML table")?;
    let section_value = table
        .entry(section.to_string())
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    let section_table = section_value
        .as_table_mut()
        .with_context(|| format!("expected a table at '{section}'"))?;

    section_table.insert(leaf.to_string(), value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

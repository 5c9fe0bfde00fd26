/// Configuration schema and defaults for the whole trimmer.
///
/// Defines the TOML-serializable configuration structure with two sections:
/// `[trim]` for the rewrite rules and editor behavior, `[logging]` for the
/// trim event log.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level mdtrim configuration.
///
/// Maps directly to the `~/.mdtrim/config.toml` and `.mdtrim.toml` file
/// schemas. All sections and fields are optional — missing values fall back
/// to built-in defaults, and unknown keys are ignored so configs written by
/// newer versions still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trim: TrimSettings,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [trim]
// ---------------------------------------------------------------------------

/// Trim rule toggles and editor behavior.
///
/// Keys are PascalCase on disk (`TrimOnSave`, `TrailingLinesKeepMax`, ...),
/// matching the names these settings have always been persisted under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrimSettings {
    /// Trim the document whenever a buffer is saved.
    pub trim_on_save: bool,
    /// Trim around the cursor after an idle pause in typing.
    pub auto_trim_document: bool,
    /// Idle pause in seconds before an automatic trim fires.
    pub auto_trim_timeout: f64,
    /// Never rewrite whitespace inside fenced or inline code spans.
    pub preserve_code_blocks: bool,
    /// Keep leading whitespace that indents a Markdown list item.
    pub preserve_indented_lists: bool,
    /// Rewrite non-breaking spaces to ordinary spaces before the rules run.
    pub convert_non_breaking_spaces: bool,
    /// Remove spaces at the end of each line.
    pub trim_trailing_spaces: bool,
    /// Remove spaces at the start of each line.
    pub trim_leading_spaces: bool,
    /// Collapse runs of 2+ spaces to one.
    pub trim_multiple_spaces: bool,
    /// Remove tabs at the end of each line.
    pub trim_trailing_tabs: bool,
    /// Remove tabs at the start of each line.
    pub trim_leading_tabs: bool,
    /// Collapse runs of 2+ tabs to one.
    pub trim_multiple_tabs: bool,
    /// Remove blank lines at the end of the document.
    pub trim_trailing_lines: bool,
    /// Remove blank lines at the start of the document.
    pub trim_leading_lines: bool,
    /// Collapse runs of blank lines to a single line ending.
    pub trim_multiple_lines: bool,
    /// Line endings to keep at the end of the document when trimming
    /// trailing lines. `0` strips them all.
    pub trailing_lines_keep_max: usize,
}

impl Default for TrimSettings {
    fn default() -> Self {
        Self {
            trim_on_save: true,
            auto_trim_document: true,
            auto_trim_timeout: 2.5,
            preserve_code_blocks: true,
            preserve_indented_lists: true,
            convert_non_breaking_spaces: false,
            trim_trailing_spaces: true,
            trim_leading_spaces: false,
            trim_multiple_spaces: false,
            trim_trailing_tabs: true,
            trim_leading_tabs: false,
            trim_multiple_tabs: false,
            trim_trailing_lines: true,
            trim_leading_lines: false,
            trim_multiple_lines: false,
            trailing_lines_keep_max: 0,
        }
    }
}

impl TrimSettings {
    /// The idle delay as a `Duration`.
    ///
    /// Non-finite or negative timeouts count as zero, so a hand-edited
    /// config value can never panic the scheduler.
    pub fn auto_trim_delay(&self) -> Duration {
        let secs = if self.auto_trim_timeout.is_finite() && self.auto_trim_timeout > 0.0 {
            self.auto_trim_timeout
        } else {
            0.0
        };
        Duration::from_secs_f64(secs)
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether trim event logging is enabled.
    pub enabled: bool,
    /// Path to the trim event log file. `~` is expanded to the home
    /// directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "~/.mdtrim/trim-log.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default config file template
// ---------------------------------------------------------------------------

impl Config {
    /// Generate the default configuration file content, with comments.
    ///
    /// Used by `mdtrim config init` to write a fresh config file.
    pub fn default_toml() -> String {
        r#"# mdtrim Configuration
# Markdown whitespace trimmer
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (MDTRIM_*)
#   2. Project config (.mdtrim.toml in current directory)
#   3. User global config (~/.mdtrim/config.toml)
#   4. Built-in defaults

[trim]
TrimOnSave = true              # Trim when a buffer is saved
AutoTrimDocument = true        # Trim around the cursor after an idle pause
AutoTrimTimeout = 2.5          # Idle pause in seconds before an auto trim
PreserveCodeBlocks = true      # Never touch fenced or inline code
PreserveIndentedLists = true   # Keep list item indentation
ConvertNonBreakingSpaces = false

# Space rules
TrimTrailingSpaces = true
TrimLeadingSpaces = false
TrimMultipleSpaces = false

# Tab rules
TrimTrailingTabs = true
TrimLeadingTabs = false
TrimMultipleTabs = false

# Line rules
TrimTrailingLines = true
TrimLeadingLines = false
TrimMultipleLines = false
TrailingLinesKeepMax = 0       # Line endings to keep at the end of the document

[logging]
enabled = false
path = "~/.mdtrim/trim-log.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_trim_trailing_only() {
        let settings = TrimSettings::default();
        assert!(settings.trim_on_save);
        assert!(settings.auto_trim_document);
        assert!(settings.preserve_code_blocks);
        assert!(settings.preserve_indented_lists);
        assert!(settings.trim_trailing_spaces);
        assert!(settings.trim_trailing_tabs);
        assert!(settings.trim_trailing_lines);
        assert!(!settings.trim_leading_spaces);
        assert!(!settings.trim_multiple_spaces);
        assert!(!settings.convert_non_breaking_spaces);
        assert_eq!(settings.trailing_lines_keep_max, 0);
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.trim.trim_on_save);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn partial_section_fills_in_defaults() {
        let config: Config = toml::from_str("[trim]\nTrimOnSave = false\n").unwrap();
        assert!(!config.trim.trim_on_save);
        assert!(config.trim.trim_trailing_spaces);
        assert_eq!(config.trim.auto_trim_timeout, 2.5);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config: Config =
            toml::from_str("[trim]\nSomeFutureSetting = true\nTrimOnSave = false\n").unwrap();
        assert!(!config.trim.trim_on_save);
    }

    #[test]
    fn settings_serialize_under_pascal_case_keys() {
        let rendered = toml::to_string(&Config::default()).unwrap();
        assert!(rendered.contains("TrimOnSave = true"));
        assert!(rendered.contains("TrailingLinesKeepMax = 0"));
        assert!(rendered.contains("AutoTrimTimeout = 2.5"));
    }

    #[test]
    fn default_toml_parses_back() {
        let toml_str = Config::default_toml();
        let config: Config = toml::from_str(&toml_str).unwrap();
        assert!(config.trim.trim_on_save);
        assert!(config.trim.preserve_code_blocks);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn auto_trim_delay_converts_seconds() {
        let settings = TrimSettings {
            auto_trim_timeout: 0.5,
            ..TrimSettings::default()
        };
        assert_eq!(settings.auto_trim_delay(), Duration::from_millis(500));
    }

    #[test]
    fn auto_trim_delay_guards_bad_values() {
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let settings = TrimSettings {
                auto_trim_timeout: bad,
                ..TrimSettings::default()
            };
            assert_eq!(settings.auto_trim_delay(), Duration::ZERO);
        }
    }
}

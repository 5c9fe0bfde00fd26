//! Whitespace trim engine.
//!
//! Rewrites a Markdown document according to the enabled settings while
//! leaving code spans untouched. The pipeline is deterministic and pure;
//! callers decide when to run it (save hook, idle timer, explicit command).
//!
//! # Pipeline Stages
//!
//! 1. **Tokenize** — swap fenced and inline code spans for placeholder
//!    tokens so the rules never see protected content (skipped when code
//!    block preservation is off).
//! 2. **Convert** — rewrite non-breaking spaces to ordinary spaces so they
//!    participate in the rules below.
//! 3. **Rules** — the seven gated rewriters from [`rules`], in fixed order:
//!    trailing characters, trailing lines, leading characters, leading
//!    lines, multiple spaces, multiple tabs, multiple lines.
//! 4. **Restore** — swap the placeholder tokens back for the original code
//!    spans.

pub mod document;
pub mod regions;
pub mod rules;
pub mod tokens;

use crate::config::schema::TrimSettings;

/// Trim a document according to `settings`.
///
/// Infallible and idempotent: running the result through again returns it
/// unchanged. With every rule disabled this is the identity function.
pub fn trim_text(text: &str, settings: &TrimSettings) -> String {
    if !settings.preserve_code_blocks {
        return apply_rules(text, settings);
    }

    let (masked, terms) = tokens::tokenize(text, tokens::TOKEN_PREFIX, &tokens::code_patterns());
    let trimmed = apply_rules(&masked, settings);
    tokens::restore(&trimmed, tokens::TOKEN_PREFIX, &terms)
}

/// Apply the enabled rewrite rules in their fixed order.
///
/// Ordering matters twice over: conversion runs first so converted spaces
/// are visible to every rule, and trailing/leading removal runs before the
/// collapse rules so runs slated for deletion are never collapsed into a
/// survivor instead.
fn apply_rules(text: &str, settings: &TrimSettings) -> String {
    let mut text = if settings.convert_non_breaking_spaces {
        rules::convert_non_breaking_spaces(text)
    } else {
        text.to_string()
    };

    if settings.trim_trailing_spaces || settings.trim_trailing_tabs {
        text = rules::trim_trailing_characters(
            &text,
            settings.trim_trailing_spaces,
            settings.trim_trailing_tabs,
        );
    }
    if settings.trim_trailing_lines {
        text = rules::trim_trailing_lines(&text, settings.trailing_lines_keep_max);
    }
    if settings.trim_leading_spaces || settings.trim_leading_tabs {
        text = rules::trim_leading_characters(
            &text,
            settings.trim_leading_spaces,
            settings.trim_leading_tabs,
            settings.preserve_indented_lists,
        );
    }
    if settings.trim_leading_lines {
        text = rules::trim_leading_lines(&text);
    }
    if settings.trim_multiple_spaces {
        text = rules::trim_multiple_spaces(&text);
    }
    if settings.trim_multiple_tabs {
        text = rules::trim_multiple_tabs(&text);
    }
    if settings.trim_multiple_lines {
        text = rules::trim_multiple_lines(&text);
    }

    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

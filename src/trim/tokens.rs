//! Protected-region tokenizer.
//!
//! Swaps code spans out for placeholder tokens before the rules run, and
//! swaps them back in afterwards. The pipeline can then rewrite whitespace
//! freely without ever seeing protected content. Tokens are
//! `{{MDTRIM_PROTECTED_<index>}}` — an unlikely fixed prefix plus a counter,
//! unique within one trim invocation.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder prefix. Unlikely enough not to collide with real documents.
pub const TOKEN_PREFIX: &str = "MDTRIM_PROTECTED_";

// ---------------------------------------------------------------------------
// Compiled regexes (compiled once, reused)
// ---------------------------------------------------------------------------

/// Fenced code block: triple backticks around at least one character.
/// An unterminated fence simply fails to match and stays ordinary text.
pub(crate) static FENCED_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.+?```").expect("fenced code regex must compile"));

/// Inline code span: single backticks around at least one character.
pub(crate) static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)`.+?`").expect("inline code regex must compile"));

/// The patterns a trim call protects, in match order: fences first so their
/// interior backticks never register as inline spans.
pub(crate) fn code_patterns() -> [&'static Regex; 2] {
    [&FENCED_CODE_RE, &INLINE_CODE_RE]
}

// ---------------------------------------------------------------------------
// Tokenize / restore
// ---------------------------------------------------------------------------

/// Replace every match of `patterns` (in order) with a placeholder token,
/// returning the masked text and the extracted terms.
///
/// Each search restarts on the current, already-masked text, so a
/// substitution never overlaps an earlier one and indices come out in
/// insertion order 0..N-1. A zero-length match stops the scan for that
/// pattern rather than looping forever.
pub fn tokenize(text: &str, prefix: &str, patterns: &[&Regex]) -> (String, Vec<String>) {
    let mut masked = text.to_string();
    let mut terms: Vec<String> = Vec::new();

    for pattern in patterns {
        loop {
            let Some((range, term)) = pattern
                .find(&masked)
                .map(|m| (m.range(), m.as_str().to_string()))
            else {
                break;
            };
            if range.is_empty() {
                break;
            }

            let token = placeholder(prefix, terms.len());
            terms.push(term);
            masked.replace_range(range, &token);
        }
    }

    (masked, terms)
}

/// Replace the first occurrence of each placeholder with its stored term.
///
/// Replacement is literal, so backticks, `$`, or anything else in the term
/// can never be reinterpreted. Exact left inverse of [`tokenize`] on the
/// placeholder occurrences, no matter how the surrounding text was rewritten.
pub fn restore(text: &str, prefix: &str, terms: &[String]) -> String {
    let mut restored = text.to_string();
    for (index, term) in terms.iter().enumerate() {
        let token = placeholder(prefix, index);
        restored = restored.replacen(&token, term, 1);
    }
    restored
}

fn placeholder(prefix: &str, index: usize) -> String {
    format!("{{{{{prefix}{index}}}}}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

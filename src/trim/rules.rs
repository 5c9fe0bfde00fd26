//! Whitespace rewrite rules.
//!
//! Seven pure rewriters, each gated by its own settings toggle and applied
//! by the pipeline in a fixed order:
//!
//! 1. Trailing characters — spaces/tabs before each line ending.
//! 2. Trailing lines — blank whitespace at the end of the document.
//! 3. Leading characters — spaces/tabs at the start of each line.
//! 4. Leading lines — blank whitespace at the start of the document.
//! 5. Multiple spaces — inline runs of 2+ spaces collapse to one.
//! 6. Multiple tabs — inline runs of 2+ tabs collapse to one.
//! 7. Multiple lines — runs of blank lines collapse to one line ending.
//!
//! Trailing/leading normalization runs before the collapse rules so a run
//! that should be deleted outright is never collapsed to a survivor instead.
//! `\r\n` is treated as a single line ending throughout.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Compiled regexes (compiled once, reused)
// ---------------------------------------------------------------------------

static TRAILING_SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR) +$").expect("trailing spaces regex must compile"));

static TRAILING_TABS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)\t+$").expect("trailing tabs regex must compile"));

static TRAILING_SPACES_TABS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)[ \t]+$").expect("trailing spaces+tabs regex must compile"));

static LEADING_SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^ +").expect("leading spaces regex must compile"));

static LEADING_TABS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^\t+").expect("leading tabs regex must compile"));

static LEADING_SPACES_TABS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^[ \t]+").expect("leading spaces+tabs regex must compile"));

static SPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("space run regex must compile"));

static TAB_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t{2,}").expect("tab run regex must compile"));

/// A blank run starts at a line start, swallows as much whitespace as it can,
/// and must end immediately before a line ending (or the end of text). The
/// greedy-then-backtrack match is what leaves exactly one line ending behind
/// in the middle of a document and strips the run entirely at the tail.
static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^\s+$").expect("blank run regex must compile"));

// ---------------------------------------------------------------------------
// Trailing
// ---------------------------------------------------------------------------

/// Remove runs of the enabled characters at the end of each line.
///
/// Each character class is independent: with only spaces enabled, `"a \t"`
/// keeps the tab, and `"a\t "` loses only the final space run.
pub fn trim_trailing_characters(text: &str, spaces: bool, tabs: bool) -> String {
    let re: &Regex = match (spaces, tabs) {
        (true, true) => &TRAILING_SPACES_TABS_RE,
        (true, false) => &TRAILING_SPACES_RE,
        (false, true) => &TRAILING_TABS_RE,
        (false, false) => return text.to_string(),
    };
    re.replace_all(text, "").into_owned()
}

/// Remove blank whitespace at the end of the document, keeping at most
/// `keep_max` of the line-ending sequences found in the stripped tail.
///
/// `keep_max == 0` strips all trailing whitespace including newlines. The
/// kept endings are the ones actually present, in order, so a CRLF document
/// keeps CRLFs.
pub fn trim_trailing_lines(text: &str, keep_max: usize) -> String {
    let stripped = text.trim_end();

    if keep_max == 0 || stripped.len() == text.len() {
        return stripped.to_string();
    }

    let tail = &text[stripped.len()..];
    let endings = line_endings_in(tail);
    let keep = endings.len().min(keep_max);

    let mut result = String::with_capacity(stripped.len() + 2 * keep);
    result.push_str(stripped);
    for ending in &endings[..keep] {
        result.push_str(ending);
    }
    result
}

/// Collect the line-ending sequences in a whitespace-only tail, in order.
/// `\r\n` counts as one sequence.
fn line_endings_in(tail: &str) -> Vec<&'static str> {
    let bytes = tail.as_bytes();
    let mut endings = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                endings.push("\r\n");
                i += 2;
            }
            b'\r' => {
                endings.push("\r");
                i += 1;
            }
            b'\n' => {
                endings.push("\n");
                i += 1;
            }
            _ => i += 1,
        }
    }
    endings
}

// ---------------------------------------------------------------------------
// Leading
// ---------------------------------------------------------------------------

/// Remove runs of the enabled characters at the start of each line.
///
/// With `preserve_lists`, a run immediately followed by a list marker (`*`,
/// `-`, `+`, or digits then `.`) is left alone — it is load-bearing
/// indentation for a Markdown list item.
pub fn trim_leading_characters(
    text: &str,
    spaces: bool,
    tabs: bool,
    preserve_lists: bool,
) -> String {
    let re: &Regex = match (spaces, tabs) {
        (true, true) => &LEADING_SPACES_TABS_RE,
        (true, false) => &LEADING_SPACES_RE,
        (false, true) => &LEADING_TABS_RE,
        (false, false) => return text.to_string(),
    };

    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        if preserve_lists && starts_list_item(&text[m.end()..]) {
            continue;
        }
        result.push_str(&text[last..m.start()]);
        last = m.end();
    }
    result.push_str(&text[last..]);
    result
}

/// True when the text begins with a list marker: `*`, `-`, `+`, or one or
/// more ASCII digits followed by `.`.
fn starts_list_item(rest: &str) -> bool {
    match rest.chars().next() {
        Some('*' | '-' | '+') => true,
        Some(c) if c.is_ascii_digit() => {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            rest[digits..].starts_with('.')
        }
        _ => false,
    }
}

/// Remove blank whitespace at the start of the document.
pub fn trim_leading_lines(text: &str) -> String {
    text.trim_start().to_string()
}

// ---------------------------------------------------------------------------
// Multiple (collapse)
// ---------------------------------------------------------------------------

/// Collapse inline runs of 2+ spaces down to a single space.
pub fn trim_multiple_spaces(text: &str) -> String {
    collapse_runs(text, &SPACE_RUN_RE, ' ')
}

/// Collapse inline runs of 2+ tabs down to a single tab.
pub fn trim_multiple_tabs(text: &str) -> String {
    collapse_runs(text, &TAB_RUN_RE, '\t')
}

/// Collapse runs to a fixed point. A single pass cannot create a new run of
/// the same character, but iterating until stable keeps the postcondition
/// independent of that argument.
fn collapse_runs(text: &str, run_re: &Regex, keep: char) -> String {
    let mut current = text.to_string();
    loop {
        let next = collapse_pass(&current, run_re, keep);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn collapse_pass(text: &str, run_re: &Regex, keep: char) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for m in run_re.find_iter(text) {
        // Runs that pad a line edge or a table `|` are alignment, not noise.
        if padded_left(text, m.start()) || padded_right(text, m.end()) {
            continue;
        }
        result.push_str(&text[last..m.start()]);
        result.push(keep);
        last = m.end();
    }
    result.push_str(&text[last..]);
    result
}

/// True when only whitespace separates the run from a line start, the start
/// of text, or a table `|` on its left.
fn padded_left(text: &str, run_start: usize) -> bool {
    for c in text[..run_start].chars().rev() {
        match c {
            c if is_line_terminator(c) => return true,
            '|' => return true,
            c if c.is_whitespace() => continue,
            _ => return false,
        }
    }
    true
}

/// True when only whitespace separates the run from a line ending, the end
/// of text, or a table `|` on its right.
fn padded_right(text: &str, run_end: usize) -> bool {
    for c in text[run_end..].chars() {
        match c {
            c if is_line_terminator(c) => return true,
            '|' => return true,
            c if c.is_whitespace() => continue,
            _ => return false,
        }
    }
    true
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Collapse runs of blank/whitespace-only lines down to a single line ending.
///
/// Pinned behavior, asymmetries included:
/// - `"a\n\n\n\nb"` → `"a\n\nb"` (one blank line survives between text);
/// - `"a\n  \nb"` → `"a\n\nb"` (a whitespace-only line is emptied even when
///   trailing trimming is off);
/// - `"\n\n \nx"` → `"\nx"` and `"x\n \n\n"` → `"x\n"` (edge runs collapse
///   to a single newline).
pub fn trim_multiple_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// Non-breaking spaces
// ---------------------------------------------------------------------------

/// Rewrite every U+00A0 to an ordinary space so converted spaces participate
/// in the trimming and collapsing rules.
pub fn convert_non_breaking_spaces(text: &str) -> String {
    text.replace('\u{a0}', " ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

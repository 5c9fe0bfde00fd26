//! Region boundary locator.
//!
//! Given a cursor offset, find the smallest span around it that a live trim
//! must leave untouched: the enclosing code fence (padded by one character on
//! each side for the blank line conventionally surrounding a fence), the
//! enclosing whitespace run, or failing both, the zero-width span at the
//! offset itself.

use std::sync::LazyLock;

use regex::Regex;

use super::tokens::FENCED_CODE_RE;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace run regex must compile"));

/// Half-open byte span into a document. `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locate the do-not-touch zone around `offset`.
///
/// Scans the text once per pattern and binary-searches the collected spans;
/// containment is inclusive on both endpoints, so a cursor sitting exactly on
/// a span edge still claims that span.
pub fn cursor_region(text: &str, offset: usize, preserve_code_blocks: bool) -> Span {
    if preserve_code_blocks
        && let Some(fence) = containing_span(&scan_spans(&FENCED_CODE_RE, text), offset)
    {
        return pad_by_one_char(text, fence);
    }

    if let Some(run) = containing_span(&scan_spans(&WHITESPACE_RUN_RE, text), offset) {
        return run;
    }

    Span::new(offset, offset)
}

/// Widen a span by one character on each side, clamped to the text. Padding
/// by whole characters keeps the result on char boundaries so callers can
/// slice at it.
fn pad_by_one_char(text: &str, span: Span) -> Span {
    let start = text[..span.start]
        .chars()
        .next_back()
        .map_or(span.start, |c| span.start - c.len_utf8());
    let end = text[span.end..]
        .chars()
        .next()
        .map_or(span.end, |c| span.end + c.len_utf8());
    Span::new(start, end)
}

/// All non-overlapping matches of `re`, in ascending order.
fn scan_spans(re: &Regex, text: &str) -> Vec<Span> {
    re.find_iter(text)
        .map(|m| Span::new(m.start(), m.end()))
        .collect()
}

/// Binary search for the span containing `offset` (inclusive of both ends).
fn containing_span(spans: &[Span], offset: usize) -> Option<Span> {
    let idx = spans.partition_point(|span| span.end < offset);
    spans
        .get(idx)
        .filter(|span| span.start <= offset && offset <= span.end)
        .copied()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

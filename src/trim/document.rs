//! Document trims with selection remapping.
//!
//! A whole-document rewrite moves every byte after the first deletion, so
//! the caller's selection has to move with it. Both entry points return the
//! rewritten text together with the remapped selection endpoints:
//!
//! - [`trim_document`] rewrites the entire document and remaps each endpoint
//!   by how much text vanished before it.
//! - [`trim_document_around`] leaves the region between the endpoints (plus
//!   the zones around them) untouched and only trims the text before and
//!   after, for live trims that must not yank content out from under the
//!   cursor.
//!
//! Offsets are byte offsets on `char` boundaries, with `from <= to`.

use crate::config::schema::TrimSettings;

use super::regions::cursor_region;
use super::trim_text;

/// A rewritten document plus the selection that survives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTrim {
    pub text: String,
    pub from: usize,
    pub to: usize,
}

/// Trim the whole document and remap the selection endpoints.
///
/// Each endpoint moves left by the number of bytes trimming removed from the
/// text before it; content can only shrink, so the result always lands
/// inside the new text.
pub fn trim_document(
    text: &str,
    settings: &TrimSettings,
    from: usize,
    to: usize,
) -> DocumentTrim {
    DocumentTrim {
        text: trim_text(text, settings),
        from: remapped_offset(text, settings, from),
        to: remapped_offset(text, settings, to),
    }
}

/// Where `offset` lands after the document is trimmed.
fn remapped_offset(text: &str, settings: &TrimSettings, offset: usize) -> usize {
    let clamped = offset.min(text.len());
    let prefix = &text[..clamped];
    clamped - (prefix.len() - trim_text(prefix, settings).len())
}

/// Trim everything strictly outside the selection's protective zones.
///
/// The zones come from [`cursor_region`]: the code fence, whitespace run, or
/// zero-width span each endpoint sits in. Text before the start zone and
/// after the end zone is trimmed independently; the stretch in between is
/// passed through verbatim, so the edit under the cursor is never disturbed.
pub fn trim_document_around(
    text: &str,
    settings: &TrimSettings,
    from: usize,
    to: usize,
) -> DocumentTrim {
    let from = from.min(text.len());
    let to = to.min(text.len());

    let start_zone = cursor_region(text, from, settings.preserve_code_blocks);
    let end_zone = cursor_region(text, to, settings.preserve_code_blocks);

    let before = &text[..start_zone.start];
    let middle = &text[start_zone.start..end_zone.end];
    let after = &text[end_zone.end..];

    let before_trimmed = trim_text(before, settings);
    let after_trimmed = trim_text(after, settings);
    let delta = before.len() - before_trimmed.len();

    let mut result =
        String::with_capacity(before_trimmed.len() + middle.len() + after_trimmed.len());
    result.push_str(&before_trimmed);
    result.push_str(middle);
    result.push_str(&after_trimmed);

    DocumentTrim {
        text: result,
        from: from - delta,
        to: to - delta,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

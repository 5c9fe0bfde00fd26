//! Editor-facing trim commands.
//!
//! The engine itself is pure text-in/text-out; this module is the glue that
//! applies it to a live buffer: read the document and selection through
//! [`EditorSurface`], trim, write back, and put the cursor where the user
//! left it. Hosts implement the trait; the commands never talk to a real
//! editor directly, which is also what makes them testable.

pub mod debounce;

use crate::config::schema::TrimSettings;
use crate::trim::document;
use crate::trim::trim_text;

// ---------------------------------------------------------------------------
// Editor surface
// ---------------------------------------------------------------------------

/// A zero-based line/column position in an editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

/// Which end of the selection to read. With no selection both ends sit on
/// the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEnd {
    From,
    To,
}

/// What prompted a document trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimTrigger {
    /// Explicit user command; always runs.
    Command,
    /// Save hook; gated on `TrimOnSave`.
    Save,
    /// Idle auto trim; gated on `AutoTrimDocument`.
    AutoTrim,
}

/// The slice of editor behavior the trim commands need.
///
/// Implemented by host integrations; tests use an in-memory fake. Offsets
/// are byte offsets on `char` boundaries.
pub trait EditorSurface {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn selection_text(&self) -> String;
    /// Replace the current selection, leaving the cursor collapsed at the
    /// end of the inserted text.
    fn replace_selection(&mut self, text: &str);
    fn cursor(&self, end: SelectionEnd) -> Pos;
    fn offset_at(&self, pos: Pos) -> usize;
    fn position_at(&self, offset: usize) -> Pos;
    fn set_selection(&mut self, from: Pos, to: Pos);
    /// Surface a short message to the user.
    fn notify(&mut self, message: &str);
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Trim the active document, preserving the cursor and selection.
///
/// `editor` is `None` when no buffer has focus; nothing happens then. Save
/// and auto triggers gate on their settings, and an idle trim works around
/// the cursor ([`document::trim_document_around`]) so the whitespace being
/// typed this instant is never yanked away. A trim that changes nothing
/// leaves the editor completely untouched.
pub fn trim_document(
    editor: Option<&mut dyn EditorSurface>,
    settings: &TrimSettings,
    trigger: TrimTrigger,
) {
    let Some(editor) = editor else {
        return;
    };

    let enabled = match trigger {
        TrimTrigger::Command => true,
        TrimTrigger::Save => settings.trim_on_save,
        TrimTrigger::AutoTrim => settings.auto_trim_document,
    };
    if !enabled {
        return;
    }

    let text = editor.text();
    let from = editor.offset_at(editor.cursor(SelectionEnd::From));
    let to = editor.offset_at(editor.cursor(SelectionEnd::To));

    let result = match trigger {
        TrimTrigger::AutoTrim => document::trim_document_around(&text, settings, from, to),
        _ => document::trim_document(&text, settings, from, to),
    };

    if result.text == text {
        return;
    }

    editor.set_text(&result.text);
    let from_pos = editor.position_at(result.from);
    let to_pos = editor.position_at(result.to);
    editor.set_selection(from_pos, to_pos);
}

/// Trim only the selected text, keeping it selected afterwards.
///
/// With nothing selected the user gets a notice instead of a silent no-op.
pub fn trim_selection(editor: Option<&mut dyn EditorSurface>, settings: &TrimSettings) {
    let Some(editor) = editor else {
        return;
    };

    let selected = editor.selection_text();
    if selected.is_empty() {
        editor.notify("Select text to trim!");
        return;
    }

    let trimmed = trim_text(&selected, settings);
    if trimmed == selected {
        return;
    }

    editor.replace_selection(&trimmed);

    // The cursor now sits collapsed at the end of the insert; walk back over
    // the inserted text to reselect it.
    let to = editor.offset_at(editor.cursor(SelectionEnd::To));
    let from = to.saturating_sub(trimmed.len());
    let from_pos = editor.position_at(from);
    let to_pos = editor.position_at(to);
    editor.set_selection(from_pos, to_pos);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

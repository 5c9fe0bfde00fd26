use std::time::{Duration, Instant};

use mdtrim::TrimSettings;
use mdtrim::editor::debounce::AutoTrimScheduler;
use mdtrim::editor::{EditorSurface, Pos, SelectionEnd, TrimTrigger, trim_document, trim_selection};

// ---------------------------------------------------------------------------
// Fake editor
// ---------------------------------------------------------------------------

/// In-memory buffer with real line/column arithmetic, the way a host editor
/// would expose it. Columns are byte offsets within their line.
struct FakeEditor {
    text: String,
    from: usize,
    to: usize,
    set_text_calls: usize,
    notices: Vec<String>,
}

impl FakeEditor {
    fn with_cursor(text: &str, offset: usize) -> Self {
        Self::with_selection(text, offset, offset)
    }

    fn with_selection(text: &str, from: usize, to: usize) -> Self {
        FakeEditor {
            text: text.to_string(),
            from,
            to,
            set_text_calls: 0,
            notices: Vec::new(),
        }
    }

    fn selection(&self) -> (usize, usize) {
        (self.from, self.to)
    }
}

impl EditorSurface for FakeEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.set_text_calls += 1;
        self.from = self.from.min(self.text.len());
        self.to = self.to.min(self.text.len());
    }

    fn selection_text(&self) -> String {
        self.text[self.from..self.to].to_string()
    }

    fn replace_selection(&mut self, text: &str) {
        let end = self.from + text.len();
        self.text.replace_range(self.from..self.to, text);
        self.from = end;
        self.to = end;
    }

    fn cursor(&self, end: SelectionEnd) -> Pos {
        match end {
            SelectionEnd::From => self.position_at(self.from),
            SelectionEnd::To => self.position_at(self.to),
        }
    }

    fn offset_at(&self, pos: Pos) -> usize {
        let mut start = 0;
        for _ in 0..pos.line {
            match self.text[start..].find('\n') {
                Some(i) => start += i + 1,
                None => break,
            }
        }
        (start + pos.column).min(self.text.len())
    }

    fn position_at(&self, offset: usize) -> Pos {
        let clamped = offset.min(self.text.len());
        let before = &self.text[..clamped];
        let line = before.matches('\n').count();
        let column = clamped - before.rfind('\n').map_or(0, |i| i + 1);
        Pos { line, column }
    }

    fn set_selection(&mut self, from: Pos, to: Pos) {
        self.from = self.offset_at(from);
        self.to = self.offset_at(to);
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ---------------------------------------------------------------------------
// Document trims
// ---------------------------------------------------------------------------

#[test]
fn save_trim_keeps_the_cursor_on_its_character() {
    let settings = TrimSettings::default();
    // Cursor on the 't' of "beta".
    let mut editor = FakeEditor::with_cursor("alpha  \nbeta", 10);

    trim_document(Some(&mut editor), &settings, TrimTrigger::Save);

    assert_eq!(editor.text, "alpha\nbeta");
    assert_eq!(editor.selection(), (8, 8));
    assert_eq!(editor.text.as_bytes()[8], b't');
    assert_eq!(editor.set_text_calls, 1);
}

#[test]
fn selection_endpoints_survive_a_document_trim() {
    let settings = TrimSettings::default();
    // 'r' of "word" through 'x' of "next".
    let mut editor = FakeEditor::with_selection("word  \nnext  \n", 2, 9);

    trim_document(Some(&mut editor), &settings, TrimTrigger::Command);

    assert_eq!(editor.text, "word\nnext");
    assert_eq!(editor.selection(), (2, 7));
    assert_eq!(editor.text.as_bytes()[2], b'r');
    assert_eq!(editor.text.as_bytes()[7], b'x');
}

#[test]
fn command_trigger_runs_even_with_save_and_auto_off() {
    let settings = TrimSettings {
        trim_on_save: false,
        auto_trim_document: false,
        ..TrimSettings::default()
    };
    let mut editor = FakeEditor::with_cursor("end  ", 5);

    trim_document(Some(&mut editor), &settings, TrimTrigger::Command);

    assert_eq!(editor.text, "end");
    assert_eq!(editor.selection(), (3, 3));
}

#[test]
fn save_and_auto_triggers_respect_their_toggles() {
    let settings = TrimSettings {
        trim_on_save: false,
        auto_trim_document: false,
        ..TrimSettings::default()
    };

    let mut editor = FakeEditor::with_cursor("end  ", 5);
    trim_document(Some(&mut editor), &settings, TrimTrigger::Save);
    trim_document(Some(&mut editor), &settings, TrimTrigger::AutoTrim);

    assert_eq!(editor.text, "end  ");
    assert_eq!(editor.set_text_calls, 0);
}

#[test]
fn clean_documents_are_never_rewritten() {
    let settings = TrimSettings::default();
    let mut editor = FakeEditor::with_cursor("clean\ntext", 7);

    trim_document(Some(&mut editor), &settings, TrimTrigger::Save);

    assert_eq!(editor.set_text_calls, 0);
    assert_eq!(editor.selection(), (7, 7));
}

#[test]
fn leading_trim_remaps_a_cursor_at_the_end() {
    let settings = TrimSettings {
        trim_trailing_spaces: false,
        trim_trailing_tabs: false,
        trim_trailing_lines: false,
        trim_leading_spaces: true,
        ..TrimSettings::default()
    };
    let mut editor = FakeEditor::with_cursor("  abc\n", 6);

    trim_document(Some(&mut editor), &settings, TrimTrigger::Command);

    assert_eq!(editor.text, "abc\n");
    assert_eq!(editor.selection(), (4, 4));
}

#[test]
fn multibyte_text_keeps_positions_on_char_boundaries() {
    let settings = TrimSettings::default();
    // Cursor right after the 'd' of "wörld".
    let mut editor = FakeEditor::with_cursor("héllo  \nwörld  ", 15);

    trim_document(Some(&mut editor), &settings, TrimTrigger::Save);

    assert_eq!(editor.text, "héllo\nwörld");
    assert_eq!(editor.selection(), (13, 13));
    assert_eq!(editor.cursor(SelectionEnd::To), Pos { line: 1, column: 6 });
}

#[test]
fn no_editor_is_a_quiet_no_op() {
    let settings = TrimSettings::default();
    trim_document(None, &settings, TrimTrigger::Command);
    trim_selection(None, &settings);
}

// ---------------------------------------------------------------------------
// Idle trims
// ---------------------------------------------------------------------------

#[test]
fn auto_trim_spares_the_run_under_the_cursor() {
    let settings = TrimSettings::default();
    // Cursor inside the trailing run the user is still typing.
    let mut editor = FakeEditor::with_cursor("word  \nnext  ", 5);

    trim_document(Some(&mut editor), &settings, TrimTrigger::AutoTrim);

    assert_eq!(editor.text, "word  \nnext");
    assert_eq!(editor.selection(), (5, 5));
}

#[test]
fn auto_trim_protects_the_fence_around_the_cursor() {
    let settings = TrimSettings::default();
    // Cursor on the 'd' of "code", inside the fence.
    let mut editor = FakeEditor::with_cursor("intro  \n```\ncode  \n```\noutro  ", 14);

    trim_document(Some(&mut editor), &settings, TrimTrigger::AutoTrim);

    assert_eq!(editor.text, "intro\n```\ncode  \n```\noutro");
    assert_eq!(editor.selection(), (12, 12));
    assert_eq!(editor.text.as_bytes()[12], b'd');
}

// ---------------------------------------------------------------------------
// Selection trims
// ---------------------------------------------------------------------------

#[test]
fn selection_trim_reselects_the_trimmed_text() {
    let settings = TrimSettings::default();
    let mut editor = FakeEditor::with_selection("# H\n  one  \n  two  \n", 4, 19);

    trim_selection(Some(&mut editor), &settings);

    assert_eq!(editor.text, "# H\n  one\n  two\n");
    assert_eq!(editor.selection(), (4, 15));
    assert_eq!(editor.selection_text(), "  one\n  two");
    assert_eq!(editor.cursor(SelectionEnd::From), Pos { line: 1, column: 0 });
    assert_eq!(editor.cursor(SelectionEnd::To), Pos { line: 2, column: 5 });
}

#[test]
fn empty_selection_prompts_the_user() {
    let settings = TrimSettings::default();
    let mut editor = FakeEditor::with_cursor("text", 2);

    trim_selection(Some(&mut editor), &settings);

    assert_eq!(editor.notices, vec!["Select text to trim!".to_string()]);
    assert_eq!(editor.text, "text");
}

#[test]
fn clean_selections_are_left_alone() {
    let settings = TrimSettings::default();
    let mut editor = FakeEditor::with_selection("AB cd EF", 3, 5);

    trim_selection(Some(&mut editor), &settings);

    assert_eq!(editor.text, "AB cd EF");
    assert_eq!(editor.selection(), (3, 5));
    assert!(editor.notices.is_empty());
}

// ---------------------------------------------------------------------------
// Scheduler-driven trims
// ---------------------------------------------------------------------------

#[test]
fn scheduler_fires_on_the_settings_cadence() {
    let settings = TrimSettings {
        auto_trim_timeout: 0.5,
        ..TrimSettings::default()
    };
    let mut scheduler = AutoTrimScheduler::new();
    scheduler.enable(settings.auto_trim_delay());

    let base = Instant::now();
    assert!(scheduler.on_edit(base));
    assert!(!scheduler.on_edit(base + ms(200)));
    assert!(!scheduler.on_edit(base + ms(600)));
    // Quiet since the edit at 600ms; past that deadline we fire again.
    assert!(scheduler.on_edit(base + ms(1200)));
}

#[test]
fn settings_toggle_reinitializes_the_scheduler() {
    let settings = TrimSettings {
        auto_trim_timeout: 0.5,
        ..TrimSettings::default()
    };
    let mut scheduler = AutoTrimScheduler::new();
    scheduler.enable(settings.auto_trim_delay());

    let base = Instant::now();
    assert!(scheduler.on_edit(base));

    scheduler.disable();
    assert!(!scheduler.is_enabled());
    assert!(!scheduler.on_edit(base + ms(5000)));

    // Re-enabling starts from a clean leading edge.
    scheduler.enable(settings.auto_trim_delay());
    assert!(scheduler.on_edit(base + ms(5001)));
}

#[test]
fn idle_edits_trim_once_per_quiet_window() {
    let settings = TrimSettings {
        auto_trim_timeout: 0.1,
        ..TrimSettings::default()
    };
    let mut scheduler = AutoTrimScheduler::new();
    scheduler.enable(settings.auto_trim_delay());
    let mut editor = FakeEditor::with_cursor("draft  \nnext  ", 5);

    let base = Instant::now();
    for offset in [0, 50, 200] {
        if scheduler.on_edit(base + ms(offset)) {
            trim_document(Some(&mut editor), &settings, TrimTrigger::AutoTrim);
        }
    }

    // The first edit trimmed everything outside the cursor's run; the edit
    // at 200ms fired again but found nothing left to change.
    assert_eq!(editor.text, "draft  \nnext");
    assert_eq!(editor.set_text_calls, 1);
    assert_eq!(editor.selection(), (5, 5));
}

//! Debounce timing for the automatic trimmer.
//!
//! Editors deliver a change event per keystroke; trimming on every one would
//! fight the user mid-word. The debouncer fires on the first event of a
//! burst and swallows the rest until the configured window has passed with
//! no events at all.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Leading-edge debouncer over caller-supplied clocks.
///
/// The caller passes `now` explicitly, which keeps behavior deterministic
/// under test; production callers pass `Instant::now()`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    quiet_until: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            quiet_until: None,
        }
    }

    /// Report an event at `now`; true when the caller should act on it.
    ///
    /// Every event, acted on or not, pushes the quiet deadline out to
    /// `now + window`, so a steady stream of edits fires exactly once at
    /// the front of the burst.
    pub fn should_fire(&mut self, now: Instant) -> bool {
        let fire = match self.quiet_until {
            None => true,
            Some(deadline) => now >= deadline,
        };
        self.quiet_until = Some(now + self.window);
        fire
    }

    /// Forget any pending deadline; the next event fires immediately.
    pub fn reset(&mut self) {
        self.quiet_until = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

// ---------------------------------------------------------------------------
// Auto trim scheduler
// ---------------------------------------------------------------------------

/// Wires the debouncer to the auto trim toggle.
///
/// Disabled is the absence of a debouncer, so toggling off and back on (as
/// the settings UI does whenever the timeout changes) always starts from a
/// clean slate with the new window and no leftover deadline.
#[derive(Debug, Default)]
pub struct AutoTrimScheduler {
    debouncer: Option<Debouncer>,
}

impl AutoTrimScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the scheduler on with the given quiet window, discarding any
    /// previous debouncer state.
    pub fn enable(&mut self, window: Duration) {
        self.debouncer = Some(Debouncer::new(window));
    }

    /// Turn the scheduler off and drop any pending state.
    pub fn disable(&mut self) {
        self.debouncer = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.debouncer.is_some()
    }

    /// Report an edit at `now`; true when the caller should trim.
    pub fn on_edit(&mut self, now: Instant) -> bool {
        match self.debouncer.as_mut() {
            Some(debouncer) => debouncer.should_fire(now),
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

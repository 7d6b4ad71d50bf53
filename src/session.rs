//! Per-session query state
//!
//! One `SessionState` lives for the lifetime of an engine. `current_term` is
//! updated synchronously on every keystroke and is the sole authority for
//! staleness checks: every fetch completion is validated against it before
//! any state is committed.

/// Independently toggled loading flags, one per fetch mode
///
/// The renderer shows full-screen skeletons only for `primary` and inline
/// indicators for the others, so each flag is observable on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    /// An authoritative page-0 fetch is in flight
    pub primary: bool,
    /// A supplementary cache-augmentation fetch is in flight
    pub background: bool,
    /// A "load more" pagination fetch is in flight
    pub more_results: bool,
}

/// Mutable state of the active search session
#[derive(Debug, Default)]
pub struct SessionState {
    /// Latest raw user input, updated synchronously on every keystroke
    pub current_term: String,
    /// Term of the most recent accepted primary/background/paginate success
    pub last_committed_term: String,
    /// Zero-based page counter for pagination
    pub page: u32,
    /// Server-reported remaining pages
    pub pages_left: u32,
    /// Whether the user has really scrolled since the term last changed
    ///
    /// Gates pagination: inverted/virtualized list widgets fire synthetic
    /// end-reached events on initial layout, before any user scroll.
    pub user_has_scrolled: bool,
    /// Bumped on every keystroke; debounce evaluations carry the generation
    /// they were scheduled for and are ignored once it moves on
    pub input_generation: u64,
    pub loading: LoadingFlags,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke: update the term and reset per-term state
    ///
    /// Runs synchronously on every input change, before any debounce delay.
    /// Returns the new input generation for the debounce timer to carry.
    pub fn note_input(&mut self, term: &str) -> u64 {
        self.current_term = term.to_string();
        self.page = 0;
        self.user_has_scrolled = false;
        self.input_generation = self.input_generation.wrapping_add(1);
        self.input_generation
    }

    /// Latch the user-scroll flag; idempotent until the next term change
    pub fn mark_user_scrolled(&mut self) {
        self.user_has_scrolled = true;
    }

    /// Whether a "load more" fetch may fire right now
    pub fn can_load_more(&self) -> bool {
        self.pages_left > 0 && !self.loading.more_results && self.user_has_scrolled
    }
}

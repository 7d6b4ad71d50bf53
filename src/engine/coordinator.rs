//! Fetch coordination: evaluation, merging, and staleness guarding
//!
//! `EngineCore` owns the result cache, the session state, and the ordered
//! display list, and exposes synchronous transitions only. The async worker
//! is pure plumbing around this type: it forwards events one at a time, so
//! no transition ever interleaves with another and no locking is needed.
//! Every completion reads the state current at that moment; nothing is
//! decided from values captured at dispatch time except the fetched term
//! itself, which exists precisely to be compared against `current_term`.

use crate::cache::ResultCache;
use crate::client::{ClientError, QueryResponse};
use crate::decision;
use crate::session::{LoadingFlags, SessionState};
use crate::suggestion::SuggestionItem;

/// What a fetch is for, and therefore how its result is merged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Page-0 authoritative fetch: optimistically resets, then replaces
    /// cache and display wholesale
    Primary,
    /// Supplementary fetch while cached results are already shown: only ever
    /// adds items the cache doesn't hold yet
    Background,
    /// "Load more" fetch for page > 0: appends the next page
    Paginate,
}

/// A fetch the engine has decided to dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub term: String,
    pub page: u32,
    pub mode: FetchMode,
}

/// A finished fetch, successful or not
#[derive(Debug)]
pub struct FetchOutcome {
    /// The term the fetch was dispatched for; compared against the current
    /// term on arrival
    pub term: String,
    pub page: u32,
    pub mode: FetchMode,
    pub result: Result<QueryResponse, ClientError>,
}

/// Observable engine state published to the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Ordered display items
    pub items: Vec<SuggestionItem>,
    pub loading: LoadingFlags,
}

/// The engine's state machine, driven one event at a time
#[derive(Debug, Default)]
pub struct EngineCore {
    pub session: SessionState,
    cache: ResultCache,
    display: Vec<SuggestionItem>,
}

impl EngineCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke; returns the generation for the debounce timer
    pub fn note_input(&mut self, term: &str) -> u64 {
        self.session.note_input(term)
    }

    /// Latch the user-scroll flag for the current term
    pub fn mark_user_scrolled(&mut self) {
        self.session.mark_user_scrolled();
    }

    /// Debounced evaluation of the current term
    ///
    /// Blank term: clear cache and display, no fetch. Cache-servable term:
    /// install the filtered subset as the display, then either plan a
    /// background augmentation (term strictly extends the committed one) or,
    /// if the filter came up empty, fall back to an authoritative fetch.
    /// Anything else needs a fresh primary fetch.
    pub fn evaluate(&mut self) -> Option<FetchPlan> {
        let term = self.session.current_term.clone();

        if term.trim().is_empty() {
            self.cache.clear();
            self.display.clear();
            return None;
        }

        if decision::should_use_cache(&self.cache, &term, &self.session.last_committed_term) {
            self.display = decision::filter_cached(&self.cache, &term);

            if decision::should_augment_in_background(&term, &self.session.last_committed_term) {
                return Some(FetchPlan {
                    term,
                    page: 0,
                    mode: FetchMode::Background,
                });
            }
            if self.display.is_empty() {
                // Cache had items but none matched; need authoritative data
                return Some(FetchPlan {
                    term,
                    page: 0,
                    mode: FetchMode::Primary,
                });
            }
            return None;
        }

        Some(FetchPlan {
            term,
            page: 0,
            mode: FetchMode::Primary,
        })
    }

    /// Plan a "load more" fetch, or decline
    ///
    /// Fires only when the server reported pages remaining, no pagination
    /// fetch is already in flight, and the user has really scrolled since the
    /// term last changed.
    pub fn plan_load_more(&mut self) -> Option<FetchPlan> {
        if self.session.current_term.trim().is_empty() || !self.session.can_load_more() {
            return None;
        }

        self.session.page += 1;
        Some(FetchPlan {
            term: self.session.current_term.clone(),
            page: self.session.page,
            mode: FetchMode::Paginate,
        })
    }

    /// State transition at dispatch time, before the request goes out
    ///
    /// Sets the mode's loading flag; a primary fetch additionally resets
    /// cache and display so the renderer drops results that no longer belong
    /// to the term being fetched.
    pub fn begin_fetch(&mut self, plan: &FetchPlan) {
        self.set_loading(plan.mode, true);
        if plan.mode == FetchMode::Primary {
            self.cache.clear();
            self.display.clear();
        }
    }

    /// State transition at completion time
    ///
    /// The loading flag is cleared first, unconditionally. A completion whose
    /// term no longer matches `current_term` is discarded entirely, success
    /// and failure alike: no partial application, no merge. Only an accepted
    /// success updates `last_committed_term` and `pages_left`.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) {
        self.set_loading(outcome.mode, false);

        if outcome.term != self.session.current_term {
            log::debug!(
                "discarding stale {:?} response for {:?} (current term is {:?})",
                outcome.mode,
                outcome.term,
                self.session.current_term,
            );
            return;
        }

        match outcome.result {
            Ok(response) => {
                let items: Vec<SuggestionItem> = response
                    .autocomplete
                    .into_iter()
                    .map(SuggestionItem::from_raw)
                    .collect();

                match outcome.mode {
                    FetchMode::Primary => {
                        self.cache.replace_all(items);
                        self.display = self.cache.snapshot();
                    }
                    FetchMode::Background | FetchMode::Paginate => {
                        // De-duplicate against the cache as it is NOW, not as
                        // it was at dispatch: a primary fetch may have landed
                        // in between. Untouched display on an empty addition.
                        let accepted = self.cache.append_unique(items);
                        self.display.extend(accepted);
                    }
                }

                self.session.pages_left = response.pages_left;
                self.session.last_committed_term = outcome.term;
            }
            Err(err) => {
                log::error!(
                    "autocomplete {:?} fetch for {:?} (page {}) failed: {}",
                    outcome.mode,
                    outcome.term,
                    outcome.page,
                    err,
                );
                // Fail safe for the authoritative fetch only; best-effort
                // augmentation must not regress the visible results
                if outcome.mode == FetchMode::Primary {
                    self.cache.clear();
                    self.display.clear();
                }
            }
        }
    }

    /// Observable state for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.display.clone(),
            loading: self.session.loading,
        }
    }

    /// Ordered display items
    pub fn display(&self) -> &[SuggestionItem] {
        &self.display
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    fn set_loading(&mut self, mode: FetchMode, value: bool) {
        match mode {
            FetchMode::Primary => self.session.loading.primary = value,
            FetchMode::Background => self.session.loading.background = value,
            FetchMode::Paginate => self.session.loading.more_results = value,
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;

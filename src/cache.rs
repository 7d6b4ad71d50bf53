//! Accumulated result cache for one search session
//!
//! Insertion-ordered, de-duplicated by item id. The cache grows from primary,
//! paginated, and background fetches and is the source the client-side filter
//! reads from. It lives for one engine lifetime and is never persisted.

use std::collections::HashSet;

use crate::suggestion::SuggestionItem;

/// All items fetched so far for the current session, in arrival order
///
/// Invariant: no two entries share an id. Appends silently drop items whose
/// id is already present; on wholesale replacement the first occurrence of an
/// id wins.
#[derive(Debug, Default)]
pub struct ResultCache {
    items: Vec<SuggestionItem>,
    ids: HashSet<i64>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard prior contents and install `items` in the given order
    pub fn replace_all(&mut self, items: Vec<SuggestionItem>) {
        self.clear();
        self.append_unique(items);
    }

    /// Insert each item whose id is absent, preserving arrival order
    ///
    /// Returns the accepted subset, in order. Callers merging into a display
    /// list append exactly this subset so display and cache stay consistent.
    pub fn append_unique(&mut self, items: Vec<SuggestionItem>) -> Vec<SuggestionItem> {
        let mut accepted = Vec::new();
        for item in items {
            if self.ids.insert(item.id) {
                self.items.push(item.clone());
                accepted.push(item);
            }
        }
        accepted
    }

    /// Ordered clone of all cached items
    pub fn snapshot(&self) -> Vec<SuggestionItem> {
        self.items.clone()
    }

    /// Iterate cached items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SuggestionItem> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

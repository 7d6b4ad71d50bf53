//! Cache-vs-network decision rules and client-side filtering
//!
//! Pure functions over the result cache and the current/last-committed terms.
//! The engine consults these once per debounced keystroke to decide whether
//! the cache can serve the new term, whether a supplementary background fetch
//! is worthwhile, and what subset of the cache to display.

use crate::cache::ResultCache;
use crate::suggestion::SuggestionItem;

/// Filter cached items down to those matching `term`
///
/// Case-insensitive substring match (not merely prefix) against the item name
/// or its secondary term, cache order preserved. A blank term matches
/// nothing.
pub fn filter_cached(cache: &ResultCache, term: &str) -> Vec<SuggestionItem> {
    if term.trim().is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    cache
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item
                    .secondary_term
                    .as_ref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Decide whether the cache can serve `term` without a network fetch
///
/// An empty cache can serve nothing. A blank term needs no network. Otherwise
/// the cache is reusable exactly when the new term and the last committed
/// term sit on the same typing path: one is a case-insensitive prefix of the
/// other, so narrowing or widening a previously fetched prefix stays local.
/// An unrelated term requires a fresh authoritative fetch.
pub fn should_use_cache(cache: &ResultCache, term: &str, last_committed_term: &str) -> bool {
    if cache.is_empty() {
        return false;
    }
    if term.trim().is_empty() {
        return true;
    }
    !last_committed_term.is_empty() && is_prefix_related(term, last_committed_term)
}

/// Decide whether a supplementary background fetch should run
///
/// True only when `term` strictly extends the last committed term: the user
/// is typing more specific than what was last fetched, so the server may hold
/// matches the cache doesn't. The cached filter results are already on
/// screen; the background fetch only adds to them.
pub fn should_augment_in_background(term: &str, last_committed_term: &str) -> bool {
    !last_committed_term.trim().is_empty()
        && term.len() > last_committed_term.len()
        && term
            .to_lowercase()
            .starts_with(&last_committed_term.to_lowercase())
}

fn is_prefix_related(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.starts_with(&b) || b.starts_with(&a)
}

use super::*;
use crate::suggestion::RawItem;

fn raw(id: i64, name: &str) -> RawItem {
    RawItem {
        id,
        name: name.to_string(),
        avatar: None,
        color: String::new(),
        kind: "interest".to_string(),
        match_score: None,
        existing: None,
    }
}

fn response(items: Vec<RawItem>, pages_left: u32) -> QueryResponse {
    QueryResponse {
        autocomplete: items,
        pages_left,
    }
}

fn plan(term: &str, page: u32, mode: FetchMode) -> FetchPlan {
    FetchPlan {
        term: term.to_string(),
        page,
        mode,
    }
}

fn ok_outcome(p: &FetchPlan, resp: QueryResponse) -> FetchOutcome {
    FetchOutcome {
        term: p.term.clone(),
        page: p.page,
        mode: p.mode,
        result: Ok(resp),
    }
}

fn err_outcome(p: &FetchPlan) -> FetchOutcome {
    FetchOutcome {
        term: p.term.clone(),
        page: p.page,
        mode: p.mode,
        result: Err(ClientError::Network("connection reset".to_string())),
    }
}

/// Core with a committed primary fetch for "mus" already applied
fn core_with_mus() -> EngineCore {
    let mut core = EngineCore::new();
    core.note_input("mus");
    let p = plan("mus", 0, FetchMode::Primary);
    core.begin_fetch(&p);
    core.complete_fetch(ok_outcome(
        &p,
        response(vec![raw(1, "Music"), raw(2, "Musicals [Theatre]")], 2),
    ));
    core
}

fn display_names(core: &EngineCore) -> Vec<&str> {
    core.display().iter().map(|i| i.name.as_str()).collect()
}

// -------------------------------------------------------------------------
// Primary fetch
// -------------------------------------------------------------------------

#[test]
fn test_begin_primary_resets_optimistically() {
    let mut core = core_with_mus();
    core.note_input("zzz");
    core.begin_fetch(&plan("zzz", 0, FetchMode::Primary));

    assert!(core.display().is_empty());
    assert!(core.cache().is_empty());
    assert!(core.session.loading.primary);
}

#[test]
fn test_primary_success_replaces_wholesale() {
    let core = core_with_mus();

    assert_eq!(display_names(&core), vec!["Music", "Musicals"]);
    assert_eq!(core.cache().len(), 2);
    assert_eq!(core.session.last_committed_term, "mus");
    assert_eq!(core.session.pages_left, 2);
    assert!(!core.session.loading.primary);
}

#[test]
fn test_primary_failure_clears_everything() {
    let mut core = core_with_mus();
    core.note_input("art");
    let p = plan("art", 0, FetchMode::Primary);
    core.begin_fetch(&p);
    core.complete_fetch(err_outcome(&p));

    assert!(core.display().is_empty());
    assert!(core.cache().is_empty());
    assert!(!core.session.loading.primary);
    // Failure never commits the term
    assert_eq!(core.session.last_committed_term, "mus");
}

// -------------------------------------------------------------------------
// Staleness guard
// -------------------------------------------------------------------------

#[test]
fn test_stale_success_is_discarded_entirely() {
    let mut core = core_with_mus();
    let p = plan("mus", 0, FetchMode::Background);
    core.begin_fetch(&p);

    // The user typed on before the response arrived
    core.note_input("artist");
    core.complete_fetch(ok_outcome(&p, response(vec![raw(9, "Muse")], 5)));

    assert_eq!(display_names(&core), vec!["Music", "Musicals"]);
    assert_eq!(core.cache().len(), 2);
    assert_eq!(core.session.pages_left, 2);
    assert_eq!(core.session.last_committed_term, "mus");
    // The flag is still released
    assert!(!core.session.loading.background);
}

#[test]
fn test_stale_failure_leaves_display_untouched() {
    let mut core = core_with_mus();
    // A primary fetch for "art" goes out, then the user types past it;
    // meanwhile a newer evaluation has already repopulated the display
    core.note_input("art");
    let p = plan("art", 0, FetchMode::Primary);
    core.begin_fetch(&p);
    core.note_input("mus");
    let newer = plan("mus", 0, FetchMode::Primary);
    core.begin_fetch(&newer);
    core.complete_fetch(ok_outcome(&newer, response(vec![raw(1, "Music")], 0)));

    // The stale failure must not wipe results belonging to the newer term
    core.complete_fetch(err_outcome(&p));
    assert_eq!(display_names(&core), vec!["Music"]);
    assert_eq!(core.cache().len(), 1);
}

// -------------------------------------------------------------------------
// Background fetch
// -------------------------------------------------------------------------

#[test]
fn test_background_appends_only_unseen_items() {
    let mut core = core_with_mus();
    let p = plan("mus", 0, FetchMode::Background);
    core.begin_fetch(&p);
    core.complete_fetch(ok_outcome(
        &p,
        response(vec![raw(1, "Music"), raw(3, "Muse")], 1),
    ));

    assert_eq!(display_names(&core), vec!["Music", "Musicals", "Muse"]);
    assert_eq!(core.cache().len(), 3);
    assert_eq!(core.session.pages_left, 1);
}

#[test]
fn test_background_with_nothing_new_leaves_display_untouched() {
    let mut core = core_with_mus();
    let before = core.display().to_vec();

    let p = plan("mus", 0, FetchMode::Background);
    core.begin_fetch(&p);
    core.complete_fetch(ok_outcome(&p, response(vec![raw(1, "Music")], 0)));

    assert_eq!(core.display(), &before[..]);
}

#[test]
fn test_background_dedup_reads_cache_at_completion_time() {
    // A background fetch is dispatched, then a primary fetch for the same
    // term lands first. The background completion must de-duplicate against
    // the cache as the primary left it, not as it was at dispatch.
    let mut core = EngineCore::new();
    core.note_input("mus");

    let background = plan("mus", 0, FetchMode::Background);
    core.begin_fetch(&background);

    let primary = plan("mus", 0, FetchMode::Primary);
    core.begin_fetch(&primary);
    core.complete_fetch(ok_outcome(&primary, response(vec![raw(1, "Music")], 0)));

    core.complete_fetch(ok_outcome(
        &background,
        response(vec![raw(1, "Music"), raw(2, "Muse")], 0),
    ));

    assert_eq!(display_names(&core), vec!["Music", "Muse"]);
    assert_eq!(core.cache().len(), 2);
}

#[test]
fn test_background_failure_is_inert() {
    let mut core = core_with_mus();
    let before = core.display().to_vec();

    let p = plan("mus", 0, FetchMode::Background);
    core.begin_fetch(&p);
    core.complete_fetch(err_outcome(&p));

    assert_eq!(core.display(), &before[..]);
    assert_eq!(core.cache().len(), 2);
    assert!(!core.session.loading.background);
}

// -------------------------------------------------------------------------
// Pagination
// -------------------------------------------------------------------------

#[test]
fn test_paginate_appends_next_page() {
    let mut core = core_with_mus();
    core.mark_user_scrolled();

    let p = core.plan_load_more().unwrap();
    assert_eq!(p, plan("mus", 1, FetchMode::Paginate));
    assert!(!core.session.loading.more_results);

    core.begin_fetch(&p);
    assert!(core.session.loading.more_results);

    core.complete_fetch(ok_outcome(&p, response(vec![raw(4, "Museums")], 1)));
    assert_eq!(display_names(&core), vec!["Music", "Musicals", "Museums"]);
    assert_eq!(core.session.pages_left, 1);
    assert!(!core.session.loading.more_results);
}

#[test]
fn test_load_more_gated_on_user_scroll() {
    let mut core = core_with_mus();
    // pages_left is 2, but no real scroll happened yet
    assert_eq!(core.plan_load_more(), None);
    assert_eq!(core.session.page, 0);
}

#[test]
fn test_load_more_gated_on_in_flight_pagination() {
    let mut core = core_with_mus();
    core.mark_user_scrolled();

    let p = core.plan_load_more().unwrap();
    core.begin_fetch(&p);

    assert_eq!(core.plan_load_more(), None);
}

#[test]
fn test_load_more_gated_on_pages_left() {
    let mut core = core_with_mus();
    core.mark_user_scrolled();
    core.session.pages_left = 0;

    assert_eq!(core.plan_load_more(), None);
}

#[test]
fn test_load_more_declines_on_blank_term() {
    let mut core = core_with_mus();
    core.note_input("");
    core.mark_user_scrolled();
    core.session.pages_left = 2;

    assert_eq!(core.plan_load_more(), None);
}

#[test]
fn test_paginate_failure_keeps_existing_pages() {
    let mut core = core_with_mus();
    core.mark_user_scrolled();

    let p = core.plan_load_more().unwrap();
    core.begin_fetch(&p);
    core.complete_fetch(err_outcome(&p));

    assert_eq!(display_names(&core), vec!["Music", "Musicals"]);
    assert!(!core.session.loading.more_results);
}

// -------------------------------------------------------------------------
// Evaluation
// -------------------------------------------------------------------------

#[test]
fn test_evaluate_blank_term_clears_and_declines() {
    let mut core = core_with_mus();
    core.note_input("  ");

    assert_eq!(core.evaluate(), None);
    assert!(core.display().is_empty());
    assert!(core.cache().is_empty());
}

#[test]
fn test_evaluate_extension_filters_then_augments() {
    let mut core = core_with_mus();
    core.note_input("music");

    let p = core.evaluate();
    // Cached matches are on screen before any network activity
    assert_eq!(display_names(&core), vec!["Music", "Musicals"]);
    assert_eq!(p, Some(plan("music", 0, FetchMode::Background)));
}

#[test]
fn test_evaluate_unrelated_term_goes_to_network() {
    let mut core = core_with_mus();
    core.note_input("zzz");

    assert_eq!(core.evaluate(), Some(plan("zzz", 0, FetchMode::Primary)));
}

#[test]
fn test_evaluate_widening_with_matches_stays_local() {
    let mut core = core_with_mus();
    core.note_input("mu");

    assert_eq!(core.evaluate(), None);
    assert_eq!(display_names(&core), vec!["Music", "Musicals"]);
}

#[test]
fn test_evaluate_servable_but_empty_filter_falls_back_to_primary() {
    let mut core = core_with_mus();
    // "musz" extends "mus" so the cache is consulted, but nothing matches;
    // should_augment also holds, and augmentation takes precedence
    core.note_input("musz");
    assert_eq!(core.evaluate(), Some(plan("musz", 0, FetchMode::Background)));

    // A widening term that matches nothing has no augmentation path and
    // falls back to an authoritative fetch
    let mut core = EngineCore::new();
    core.note_input("xy");
    let p = plan("xy", 0, FetchMode::Primary);
    core.begin_fetch(&p);
    core.complete_fetch(ok_outcome(&p, response(vec![raw(7, "Xylophone")], 0)));

    core.note_input("x");
    core.session.last_committed_term = "xyz".to_string();
    // "x" is a prefix of "xyz" -> servable; filter matches Xylophone
    assert_eq!(core.evaluate(), None);
}

#[test]
fn test_evaluate_empty_cache_goes_to_network() {
    let mut core = EngineCore::new();
    core.note_input("mus");
    assert_eq!(core.evaluate(), Some(plan("mus", 0, FetchMode::Primary)));
}

#[test]
fn test_evaluate_empty_filter_without_extension_is_primary() {
    let mut core = core_with_mus();
    // Same length as committed term, prefix-related (equal), but matching
    // nothing in the cache
    core.session.last_committed_term = "qqq".to_string();
    core.note_input("qqq");

    let p = core.evaluate();
    assert_eq!(p, Some(plan("qqq", 0, FetchMode::Primary)));
    assert!(core.display().is_empty());
}

// -------------------------------------------------------------------------
// Snapshot
// -------------------------------------------------------------------------

#[test]
fn test_snapshot_reflects_display_and_flags() {
    let mut core = core_with_mus();
    let p = plan("mus", 0, FetchMode::Background);
    core.begin_fetch(&p);

    let snapshot = core.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert!(snapshot.loading.background);
    assert!(!snapshot.loading.primary);
    assert!(!snapshot.loading.more_results);
}

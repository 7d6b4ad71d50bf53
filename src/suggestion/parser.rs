//! Suggestion items and label parsing
//!
//! The autocomplete service encodes an optional secondary term in the item
//! label as a bracketed suffix:
//! ```text
//! Guitar [Instrument]
//! ```
//! `parse_label` splits that into a primary name and the secondary term.
//! Labels without a well-formed suffix pass through unchanged.

use serde::Deserialize;

/// A suggestion item as it arrives on the wire
///
/// `name` may still carry the bracketed secondary term; `type` and `match`
/// are renamed because they are reserved words in Rust.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "match", default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub existing: Option<bool>,
}

/// A fully parsed suggestion, ready for display
///
/// Immutable once constructed: the engine only ever clones and reorders
/// these, never edits them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionItem {
    /// Stable identity across fetches for the same entity
    pub id: i64,
    /// Primary display term, bracket suffix stripped
    pub name: String,
    /// Secondary term parsed from the bracketed label suffix
    pub secondary_term: Option<String>,
    /// Optional avatar image reference
    pub avatar: Option<String>,
    /// Display accent color
    pub color: String,
    /// Category tag
    pub kind: String,
    /// Server-provided relevance, when present
    pub match_score: Option<f64>,
    /// Server flag marking an entity the user already has
    pub existing: Option<bool>,
}

impl SuggestionItem {
    /// Build a display item from a wire item, splitting the label
    pub fn from_raw(raw: RawItem) -> Self {
        let (name, secondary_term) = parse_label(&raw.name);
        Self {
            id: raw.id,
            name,
            secondary_term,
            avatar: raw.avatar,
            color: raw.color,
            kind: raw.kind,
            match_score: raw.match_score,
            existing: raw.existing,
        }
    }
}

/// Split a raw label into a primary name and an optional secondary term
///
/// A label of the form `"<name> [<secondary>]"` yields the trimmed name and
/// trimmed secondary term. Everything else (no brackets, empty name, empty
/// brackets) falls back to the whole label as the name. Never fails.
pub fn parse_label(label: &str) -> (String, Option<String>) {
    if let Some(body) = label.trim_end().strip_suffix(']')
        && let Some(open) = body.rfind('[')
    {
        let name = body[..open].trim();
        let secondary = body[open + 1..].trim();
        if !name.is_empty() && !secondary.is_empty() {
            return (name.to_string(), Some(secondary.to_string()));
        }
    }
    (label.to_string(), None)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;

//! Engine configuration

use serde::Deserialize;

fn default_debounce_ms() -> u64 {
    300
}

fn default_page_limit() -> u32 {
    8
}

/// Tunables for the suggestion engine
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Quiet interval after the last keystroke before a term is evaluated
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Items requested per page from the autocomplete service
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            debounce_ms: default_debounce_ms(),
            page_limit: default_page_limit(),
        }
    }
}

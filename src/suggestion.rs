pub mod parser;

// Re-export public types
pub use parser::{RawItem, SuggestionItem, parse_label};

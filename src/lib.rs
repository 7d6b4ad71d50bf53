//! Incremental search-as-you-type suggestion engine
//!
//! As the user types, the engine decides per keystroke whether to serve
//! suggestions from the locally accumulated cache or to query the network,
//! coalescing rapid keystrokes with a debounce timer, discarding out-of-order
//! responses, and paginating on user-initiated scrolling.
//!
//! The presentation layer drives the engine through a [`SearchHandle`]:
//!
//! ```no_run
//! use std::sync::Arc;
//! use typeahead::{EngineConfig, HttpQueryClient, spawn_engine};
//!
//! # async fn demo() {
//! let client = Arc::new(HttpQueryClient::new("api-token"));
//! let mut handle = spawn_engine(client, EngineConfig::default());
//!
//! handle.query_changed("mus");
//! while handle.changed().await {
//!     let snapshot = handle.snapshot();
//!     // render snapshot.items, show skeletons per snapshot.loading
//! }
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod decision;
pub mod engine;
pub mod session;
pub mod suggestion;

pub use cache::ResultCache;
pub use client::{ClientError, HttpQueryClient, QueryClient, QueryResponse};
pub use config::EngineConfig;
pub use engine::{FetchMode, SearchHandle, Snapshot, spawn_engine};
pub use session::{LoadingFlags, SessionState};
pub use suggestion::{RawItem, SuggestionItem, parse_label};

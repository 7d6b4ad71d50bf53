//! Autocomplete query client abstraction
//!
//! Defines the transport error taxonomy, the wire response shape, and the
//! `QueryClient` trait the engine fetches through. The concrete HTTP client
//! lives in the `http` submodule; tests substitute their own implementations.

use futures::future::BoxFuture;
use serde::Deserialize;
use thiserror::Error;

use crate::suggestion::RawItem;

mod http;

pub use http::HttpQueryClient;

/// Errors that can occur while querying the autocomplete service
///
/// These are reported via logging and never retried: a failed primary fetch
/// resets the visible results, failed background/pagination fetches are
/// inert.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),
}

/// One page of autocomplete results
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResponse {
    /// Raw suggestion items for the requested page
    #[serde(default)]
    pub autocomplete: Vec<RawItem>,
    /// Pages remaining after this one; absent means none
    #[serde(default)]
    pub pages_left: u32,
}

/// Asynchronous autocomplete lookup
///
/// `term` is the raw user input, `limit` the page size, `page` the zero-based
/// page index. Implementations own all transport concerns (headers, auth,
/// timeouts); the engine never aborts an in-flight query, it discards stale
/// results on completion instead.
pub trait QueryClient {
    fn query(
        &self,
        term: &str,
        limit: u32,
        page: u32,
    ) -> BoxFuture<'_, Result<QueryResponse, ClientError>>;
}

//! HTTP client for the autocomplete service

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header;

use super::{ClientError, QueryClient, QueryResponse};

/// Default autocomplete endpoint
const DEFAULT_ENDPOINT: &str = "https://be-v2.convose.com/autocomplete/interests";

/// Autocomplete client over HTTP
///
/// Issues `GET <endpoint>?q=<term>&limit=<limit>&from=<page>` with the
/// caller-supplied authorization token. Timeouts and retries are left to the
/// underlying `reqwest::Client`; the engine treats every failure the same
/// way.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    http: reqwest::Client,
    endpoint: String,
    auth_token: String,
}

impl HttpQueryClient {
    /// Create a client against the default endpoint
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, auth_token)
    }

    /// Create a client against a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            auth_token: auth_token.into(),
        }
    }
}

impl QueryClient for HttpQueryClient {
    fn query(
        &self,
        term: &str,
        limit: u32,
        page: u32,
    ) -> BoxFuture<'_, Result<QueryResponse, ClientError>> {
        let request = self
            .http
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, &self.auth_token)
            .query(&[
                ("q", term.to_string()),
                ("limit", limit.to_string()),
                ("from", page.to_string()),
            ]);

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            response
                .json::<QueryResponse>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        }
        .boxed()
    }
}

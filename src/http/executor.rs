//! Request execution boundary
//!
//! The engine only ever sees HTTP through the `RequestExecutor` trait. The
//! shipped `HttpExecutor` performs exactly one call per invocation: no
//! retries, no backoff, no rate limiting. Pacing and retry policy belong to
//! the caller or to individual strategies.

use crate::error::{Error, Result};
use crate::request::RequestDescriptor;
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// One HTTP exchange: the status code and the raw body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Performs a single HTTP call for a request descriptor
///
/// Transport failures propagate as [`Error::Http`]; a non-success status
/// rejects with [`Error::HttpStatus`] carrying the status and body.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute the request once and return the successful response
    async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse>;
}

/// Default timeout applied to every outgoing request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed executor
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Create an executor with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create an executor with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor").finish_non_exhaustive()
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse> {
        let method: reqwest::Method = request.method.into();
        let mut req = self.client.request(method.clone(), &request.url);

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(ref body) = request.body {
            if request.json {
                req = req.json(body);
            } else {
                let raw = match body {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                };
                req = req.body(raw);
            }
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        debug!("{} {} -> {}", method, request.url, status.as_u16());

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}

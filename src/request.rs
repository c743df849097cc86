//! Request descriptors
//!
//! A `RequestDescriptor` is the mutable request state a pagination run owns:
//! strategies rewrite its query map or URL between iterations to reach the
//! next page.

use crate::types::{JsonValue, Method, StringMap};
use serde::{Deserialize, Serialize};

/// One HTTP request, owned and mutated in place by the active pagination run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Target URL
    pub url: String,
    /// HTTP method
    #[serde(default)]
    pub method: Method,
    /// Request headers
    #[serde(default)]
    pub headers: StringMap,
    /// Query parameters; strategies rewrite these between calls
    #[serde(default)]
    pub query: StringMap,
    /// Optional request body
    #[serde(default)]
    pub body: Option<JsonValue>,
    /// Send the body as JSON rather than as a raw string
    #[serde(default = "default_json")]
    pub json: bool,
}

fn default_json() -> bool {
    true
}

impl RequestDescriptor {
    /// Create a GET descriptor for a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::default(),
            headers: StringMap::new(),
            query: StringMap::new(),
            body: None,
            json: true,
        }
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn json_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a raw string body
    #[must_use]
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(JsonValue::String(body.into()));
        self.json = false;
        self
    }
}

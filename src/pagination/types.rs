//! Pagination configuration and result types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Strategy
// ============================================================================

/// The named pagination protocol of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Offset/limit query parameters (`"custom"`); the default
    #[default]
    Offset,
    /// Page-number query parameter (`"pages"`)
    Pages,
    /// Opaque cursor token echoed back through the query (`"cursor"`)
    Cursor,
    /// Next-page URL inside the response body (`"url"`)
    NextLink,
    /// Stripe's cursor protocol (`"stripe"`)
    Stripe,
}

impl Strategy {
    /// Map a stored strategy name; unknown names fall back to `Offset`
    pub fn from_name(name: &str) -> Self {
        match name {
            "pages" => Self::Pages,
            "cursor" => Self::Cursor,
            "url" => Self::NextLink,
            "stripe" => Self::Stripe,
            _ => Self::Offset,
        }
    }

    /// The stored name of this strategy
    pub fn name(self) -> &'static str {
        match self {
            Self::Offset => "custom",
            Self::Pages => "pages",
            Self::Cursor => "cursor",
            Self::NextLink => "url",
            Self::Stripe => "stripe",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Pagination Config
// ============================================================================

/// Configuration for one pagination run
///
/// `items_param` and `offset_param` are overloaded by strategy, matching how
/// stored data-request configurations name them:
/// - offset: `items_param` is the query field holding the page size,
///   `offset_param` the query field holding the running offset;
/// - pages: `offset_param` is the page-number query field;
/// - cursor: `items_param` is the *response* field carrying the next cursor
///   token, `offset_param` the query field it is echoed into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Strategy name (`custom`, `pages`, `cursor`, `url`, `stripe`);
    /// unknown names behave like `custom`
    pub strategy: String,
    /// Maximum records to keep; `0` means unlimited
    pub limit: usize,
    /// Page-size query field, or the cursor-token response field
    pub items_param: Option<String>,
    /// Offset/page-number query field, or the cursor echo query field
    pub offset_param: Option<String>,
    /// Dot-path locating the next-page URL (`url` strategy)
    pub pagination_field_path: Option<String>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            limit: 0,
            items_param: None,
            offset_param: None,
            pagination_field_path: None,
        }
    }
}

fn default_strategy() -> String {
    "custom".to_string()
}

impl PaginationConfig {
    /// Offset/limit pagination (`"custom"`)
    pub fn offset(
        items_param: impl Into<String>,
        offset_param: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self {
            strategy: "custom".to_string(),
            limit,
            items_param: Some(items_param.into()),
            offset_param: Some(offset_param.into()),
            pagination_field_path: None,
        }
    }

    /// Page-number pagination (`"pages"`)
    pub fn pages(offset_param: impl Into<String>, limit: usize) -> Self {
        Self {
            strategy: "pages".to_string(),
            limit,
            items_param: None,
            offset_param: Some(offset_param.into()),
            pagination_field_path: None,
        }
    }

    /// Cursor-token pagination (`"cursor"`)
    pub fn cursor(
        items_param: impl Into<String>,
        offset_param: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self {
            strategy: "cursor".to_string(),
            limit,
            items_param: Some(items_param.into()),
            offset_param: Some(offset_param.into()),
            pagination_field_path: None,
        }
    }

    /// Next-link pagination (`"url"`)
    pub fn next_link(pagination_field_path: impl Into<String>, limit: usize) -> Self {
        Self {
            strategy: "url".to_string(),
            limit,
            items_param: None,
            offset_param: None,
            pagination_field_path: Some(pagination_field_path.into()),
        }
    }

    /// Stripe cursor pagination (`"stripe"`)
    pub fn stripe(limit: usize) -> Self {
        Self {
            strategy: "stripe".to_string(),
            limit,
            items_param: None,
            offset_param: None,
            pagination_field_path: None,
        }
    }
}

// ============================================================================
// Aggregated Result
// ============================================================================

/// The aggregated output of a pagination run
///
/// Offset and page-number strategies yield the bare record sequence. Cursor,
/// next-link, and Stripe yield the provider's final response envelope with
/// its array fields replaced by the merged, capped sequences. The asymmetry
/// is a contract with downstream consumers, so both shapes stay explicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregatedResult {
    /// A bare ordered sequence of records
    Records(Vec<Value>),
    /// The final response envelope with merged array fields
    Envelope(Value),
}

impl AggregatedResult {
    /// The bare record sequence, when this is one
    pub fn as_records(&self) -> Option<&[Value]> {
        match self {
            Self::Records(records) => Some(records),
            Self::Envelope(_) => None,
        }
    }

    /// The response envelope, when this is one
    pub fn as_envelope(&self) -> Option<&Value> {
        match self {
            Self::Envelope(envelope) => Some(envelope),
            Self::Records(_) => None,
        }
    }

    /// Convert into a plain JSON value
    pub fn into_value(self) -> Value {
        match self {
            Self::Records(records) => Value::Array(records),
            Self::Envelope(envelope) => envelope,
        }
    }
}

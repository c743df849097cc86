//! # Depaginate
//!
//! An exhaustive pagination engine for third-party REST APIs: point it
//! at the first page and it keeps requesting follow-up pages until the
//! provider runs out of data, then hands back one aggregated JSON value.
//!
//! ## Features
//!
//! - **Five pagination strategies**: offset/limit, page numbers, cursor
//!   tokens, next-page URLs and the Stripe list protocol
//! - **Runaway protection**: duplicate-page detection and an optional
//!   record limit stop providers that never terminate
//! - **Pluggable transport**: bring your own [`RequestExecutor`] for
//!   testing or custom HTTP stacks
//! - **Cooperative cancellation**: a [`CancelToken`] aborts a run
//!   between requests and during pacing delays
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use depaginate::{paginate, CancelToken, HttpExecutor, PaginationConfig, RequestDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> depaginate::Result<()> {
//!     let request = RequestDescriptor::new("https://api.example.com/v1/users")
//!         .query_param("limit", "100");
//!     let config = PaginationConfig::offset("limit", "offset", 5000);
//!
//!     let executor = HttpExecutor::new();
//!     let result = paginate(&executor, request, &config, &CancelToken::new()).await?;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! RequestDescriptor ──▶ paginate() loop ──▶ AggregatedResult
//!                          │
//!             ┌────────────┼────────────┐
//!             │            │            │
//!        RequestExecutor  Paginator   accumulate
//!        (HTTP transport) (strategy   (merge, stop
//!                          stepping)   conditions)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the engine
pub mod error;

/// Common types and type aliases
pub mod types;

/// Request descriptors
pub mod request;

/// Array discovery in JSON responses
pub mod extract;

/// Record accumulation and stop conditions
pub mod accumulate;

/// Cooperative cancellation
pub mod cancel;

/// HTTP transport
pub mod http;

/// Pagination strategies and the fetch loop
pub mod pagination;

/// Fetch definition files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use config::FetchDefinition;
pub use http::{HttpExecutor, HttpResponse, RequestExecutor};
pub use pagination::{paginate, AggregatedResult, PaginationConfig, Strategy};
pub use request::RequestDescriptor;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

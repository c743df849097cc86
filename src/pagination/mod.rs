//! Pagination engine
//!
//! Supports: offset/limit ("custom"), page numbers ("pages"), cursor tokens
//! ("cursor"), next-link envelopes ("url"), and Stripe's cursor protocol
//! ("stripe").
//!
//! # Overview
//!
//! A run owns one `RequestDescriptor` and rewrites it between iterations,
//! issuing exactly one request at a time through a `RequestExecutor`. The
//! aggregated output keeps the provider's shape: offset and page-number
//! strategies yield the bare record sequence, the rest yield the final
//! response envelope with its arrays merged and capped.

mod runner;
mod strategies;
mod types;

pub use runner::paginate;
pub use types::{AggregatedResult, PaginationConfig, Strategy};

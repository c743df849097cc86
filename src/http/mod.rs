//! HTTP execution boundary
//!
//! The engine sees the network through the `RequestExecutor` trait only.
//! The shipped implementation is a thin reqwest client: one call per
//! invocation, a fixed timeout, and no retry or rate-limit machinery.

mod executor;

pub use executor::{HttpExecutor, HttpResponse, RequestExecutor};

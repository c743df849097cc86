//! CLI module
//!
//! Command-line interface for running paginated fetches.
//!
//! # Commands
//!
//! - `run` - Execute a fetch definition file (YAML or JSON)
//! - `fetch` - Fetch a URL directly from command-line flags

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

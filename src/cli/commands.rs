//! CLI commands and argument parsing

use crate::types::Method;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Depaginate CLI
#[derive(Parser, Debug)]
#[command(name = "depaginate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pretty-print the aggregated JSON
    #[arg(short, long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a fetch definition file (YAML or JSON)
    Run {
        /// Fetch definition file
        #[arg(short, long, value_name = "FILE")]
        request: PathBuf,
    },

    /// Fetch a URL directly from command-line flags
    Fetch {
        /// URL of the first page
        url: String,

        /// Pagination strategy (custom, pages, cursor, url, stripe)
        #[arg(short, long, default_value = "custom")]
        strategy: String,

        /// Maximum number of records to collect (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        limit: usize,

        /// Query parameter holding the page size (custom), or response
        /// field holding the next cursor (cursor)
        #[arg(long)]
        items_param: Option<String>,

        /// Query parameter to advance between pages: the offset (custom),
        /// page number (pages) or cursor (cursor)
        #[arg(long)]
        offset_param: Option<String>,

        /// Dot-separated response path to the next page URL (url)
        #[arg(long)]
        pagination_field_path: Option<String>,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: Method,

        /// Query parameter as KEY=VALUE (repeatable)
        #[arg(short = 'q', long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,

        /// Header as NAME=VALUE (repeatable)
        #[arg(short = 'H', long = "header", value_name = "NAME=VALUE")]
        header: Vec<String>,
    },
}

//! CLI runner - executes commands

use crate::cancel::CancelToken;
use crate::cli::commands::{Cli, Commands};
use crate::config::FetchDefinition;
use crate::error::{Error, Result};
use crate::http::HttpExecutor;
use crate::pagination::{paginate, AggregatedResult, PaginationConfig};
use crate::request::RequestDescriptor;
use crate::types::Method;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let definition = match &self.cli.command {
            Commands::Run { request } => FetchDefinition::from_file(request)?,
            Commands::Fetch {
                url,
                strategy,
                limit,
                items_param,
                offset_param,
                pagination_field_path,
                method,
                query,
                header,
            } => {
                let definition = FetchDefinition {
                    request: build_request(url, *method, query, header)?,
                    pagination: PaginationConfig {
                        strategy: strategy.clone(),
                        limit: *limit,
                        items_param: items_param.clone(),
                        offset_param: offset_param.clone(),
                        pagination_field_path: pagination_field_path.clone(),
                    },
                };
                definition.validate()?;
                definition
            }
        };

        debug!(
            "Fetching {} with the '{}' strategy",
            definition.request.url, definition.pagination.strategy
        );

        // Ctrl-C aborts the run in-flight instead of killing the process.
        let cancel = CancelToken::new();
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt.cancel();
            }
        });

        let result = self.fetch(definition, &cancel).await?;
        self.print(&result)
    }

    /// Execute a fetch definition against a live HTTP executor
    async fn fetch(
        &self,
        definition: FetchDefinition,
        cancel: &CancelToken,
    ) -> Result<AggregatedResult> {
        let executor = HttpExecutor::new();
        paginate(&executor, definition.request, &definition.pagination, cancel).await
    }

    /// Print the aggregated result to stdout
    fn print(&self, result: &AggregatedResult) -> Result<()> {
        let rendered = if self.cli.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Build a request descriptor from command-line flags
fn build_request(
    url: &str,
    method: Method,
    query: &[String],
    headers: &[String],
) -> Result<RequestDescriptor> {
    let mut request = RequestDescriptor::new(url).method(method);
    for pair in query {
        let (key, value) = parse_pair(pair)?;
        request = request.query_param(key, value);
    }
    for pair in headers {
        let (name, value) = parse_pair(pair)?;
        request = request.header(name, value);
    }
    Ok(request)
}

/// Split a KEY=VALUE command-line pair
fn parse_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| Error::config(format!("Expected KEY=VALUE, got '{pair}'")))
}

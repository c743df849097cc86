//! Strategy dispatch and the page-fetch loop

use super::strategies::{Paginator, Step};
use super::types::{AggregatedResult, PaginationConfig};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::http::RequestExecutor;
use crate::request::RequestDescriptor;
use serde_json::Value;
use tracing::{debug, warn};

/// Fetch every page of `request` according to `config`.
///
/// Exactly one request is outstanding at a time: each next request is
/// derived from the fully processed previous response. Any rejection
/// discards the progress accumulated so far; retrying with adjusted
/// starting parameters is the caller's decision.
pub async fn paginate(
    executor: &dyn RequestExecutor,
    mut request: RequestDescriptor,
    config: &PaginationConfig,
    cancel: &CancelToken,
) -> Result<AggregatedResult> {
    let mut paginator = Paginator::from_config(config, &mut request)?;
    let mut pages = 0usize;

    loop {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let response = tokio::select! {
            () = cancel.cancelled() => return Err(Error::Cancelled),
            response = executor.execute(&request) => response?,
        };

        let parsed: Value = match serde_json::from_str(&response.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Response body is not valid JSON: {e}");
                return Err(Error::InvalidJson {
                    status: response.status,
                });
            }
        };

        pages += 1;
        debug!("Fetched page {pages} ({} bytes)", response.body.len());

        match paginator.step(parsed, &mut request, cancel).await? {
            Step::Continue => {}
            Step::Finished(result) => return Ok(result),
        }
    }
}

//! Pagination strategy implementations
//!
//! One `Paginator` variant per protocol, each owning its per-run state. A
//! variant is handed every parsed response through [`Paginator::step`] and
//! rewrites the outgoing request in place when more pages remain.

use super::types::{AggregatedResult, PaginationConfig, Strategy};
use crate::accumulate::{self, Outcome, PageRecords};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::extract;
use crate::request::RequestDescriptor;
use crate::types::OptionStringExt;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Fixed pause before processing each Stripe response
const STRIPE_PAGE_DELAY: Duration = Duration::from_millis(1500);

/// What to do after processing one response
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    /// Issue the mutated request again
    Continue,
    /// Pagination is complete
    Finished(AggregatedResult),
}

/// Per-run state of one pagination strategy
///
/// The cursor variant deliberately carries no duplicate-page guard: a
/// provider that keeps echoing the same token will loop until its token
/// field goes falsy or the limit is hit.
#[derive(Debug)]
pub(crate) enum Paginator {
    /// Offset/limit ("custom"): advance a numeric offset query field by the
    /// page size found in the request query
    Offset {
        items_param: String,
        offset_param: String,
        limit: usize,
        total: Vec<Value>,
    },
    /// Page numbers ("pages"): increment a page-number query field by 1
    Pages {
        offset_param: String,
        limit: usize,
        total: Vec<Value>,
    },
    /// Cursor tokens ("cursor"): echo a response field back as the sole
    /// query parameter, tracking every top-level array independently
    Cursor {
        items_param: String,
        offset_param: String,
        limit: usize,
        totals: Vec<(String, Vec<Value>)>,
    },
    /// Next-link envelopes ("url"): follow a dot-path to the next page URL
    NextLink {
        path: String,
        limit: usize,
        total: Vec<Value>,
        data_key: Option<String>,
    },
    /// Stripe's cursor protocol: `data` + `has_more` + `starting_after`
    Stripe { limit: usize, total: Vec<Value> },
}

impl Paginator {
    /// Build the paginator for a config, applying first-request setup to the
    /// outgoing descriptor
    pub(crate) fn from_config(
        config: &PaginationConfig,
        request: &mut RequestDescriptor,
    ) -> Result<Self> {
        match Strategy::from_name(&config.strategy) {
            Strategy::Offset => Ok(Self::Offset {
                items_param: require(&config.items_param, "items_param")?,
                offset_param: require(&config.offset_param, "offset_param")?,
                limit: config.limit,
                total: Vec::new(),
            }),
            Strategy::Pages => {
                let offset_param = require(&config.offset_param, "offset_param")?;
                // Providers count pages from 1.
                request
                    .query
                    .entry(offset_param.clone())
                    .or_insert_with(|| "1".to_string());
                Ok(Self::Pages {
                    offset_param,
                    limit: config.limit,
                    total: Vec::new(),
                })
            }
            Strategy::Cursor => Ok(Self::Cursor {
                items_param: require(&config.items_param, "items_param")?,
                offset_param: require(&config.offset_param, "offset_param")?,
                limit: config.limit,
                totals: Vec::new(),
            }),
            Strategy::NextLink => Ok(Self::NextLink {
                path: require(&config.pagination_field_path, "pagination_field_path")?,
                limit: config.limit,
                total: Vec::new(),
                data_key: None,
            }),
            Strategy::Stripe => {
                // Stripe's maximum page size, forced unconditionally.
                request
                    .query
                    .insert("limit".to_string(), "100".to_string());
                Ok(Self::Stripe {
                    limit: config.limit,
                    total: Vec::new(),
                })
            }
        }
    }

    /// Process one parsed response, mutating `request` for the next call
    pub(crate) async fn step(
        &mut self,
        response: Value,
        request: &mut RequestDescriptor,
        cancel: &CancelToken,
    ) -> Result<Step> {
        match self {
            // ================================================================
            // Offset ("custom")
            // ================================================================
            Self::Offset {
                items_param,
                offset_param,
                limit,
                total,
            } => {
                let page = single_page(&response);
                match accumulate::merge(std::mem::take(total), page, *limit) {
                    Outcome::Finished(records) => {
                        Ok(Step::Finished(AggregatedResult::Records(records)))
                    }
                    Outcome::Continue(records) => {
                        *total = records;
                        // Advance by the page size configured in the query,
                        // not by the count the provider returned.
                        let step_by = query_number(request, items_param);
                        let offset = query_number(request, offset_param);
                        request
                            .query
                            .insert(offset_param.clone(), (offset + step_by).to_string());
                        Ok(Step::Continue)
                    }
                }
            }

            // ================================================================
            // Page numbers ("pages")
            // ================================================================
            Self::Pages {
                offset_param,
                limit,
                total,
            } => {
                let page = single_page(&response);
                match accumulate::merge(std::mem::take(total), page, *limit) {
                    Outcome::Finished(records) => {
                        Ok(Step::Finished(AggregatedResult::Records(records)))
                    }
                    Outcome::Continue(records) => {
                        *total = records;
                        let current = query_number(request, offset_param);
                        request
                            .query
                            .insert(offset_param.clone(), (current + 1).to_string());
                        Ok(Step::Continue)
                    }
                }
            }

            // ================================================================
            // Cursor tokens ("cursor")
            // ================================================================
            Self::Cursor {
                items_param,
                offset_param,
                limit,
                totals,
            } => {
                let mut limit_reached = false;
                for (key, items) in extract::all_arrays(&response) {
                    let index = match totals.iter().position(|(k, _)| k.as_str() == key) {
                        Some(index) => index,
                        None => {
                            totals.push((key.to_string(), Vec::new()));
                            totals.len() - 1
                        }
                    };
                    let merged = &mut totals[index].1;
                    merged.extend(items.iter().cloned());
                    if *limit > 0 && merged.len() >= *limit {
                        merged.truncate(*limit);
                        limit_reached = true;
                    }
                }

                let next_token = response
                    .get(items_param.as_str())
                    .filter(|token| !extract::is_falsy(Some(*token)))
                    .map(query_value);

                match next_token {
                    Some(token) if !limit_reached => {
                        // The token becomes the whole query: any original
                        // parameters are dropped, not merged.
                        request.query.clear();
                        request.query.insert(offset_param.clone(), token);
                        Ok(Step::Continue)
                    }
                    _ => {
                        let mut envelope = response;
                        write_arrays(&mut envelope, totals);
                        Ok(Step::Finished(AggregatedResult::Envelope(envelope)))
                    }
                }
            }

            // ================================================================
            // Next link ("url")
            // ================================================================
            Self::NextLink {
                path,
                limit,
                total,
                data_key,
            } => {
                let page = match extract::last_array(&response) {
                    Some((key, items)) => {
                        *data_key = Some(key.to_string());
                        PageRecords::Records(items.clone())
                    }
                    None => PageRecords::Missing,
                };

                let next_link = extract::resolve_path(&response, path)
                    .filter(|link| !extract::is_falsy(Some(*link)))
                    .map(query_value);

                match (accumulate::merge(std::mem::take(total), page, *limit), next_link) {
                    (Outcome::Continue(records), Some(link)) => {
                        *total = records;
                        request.url = absolute_url(&request.url, &link)?;
                        Ok(Step::Continue)
                    }
                    (Outcome::Continue(records) | Outcome::Finished(records), _) => {
                        let mut envelope = response;
                        if let (Value::Object(object), Some(key)) =
                            (&mut envelope, data_key.take())
                        {
                            object.insert(key, Value::Array(records));
                        }
                        Ok(Step::Finished(AggregatedResult::Envelope(envelope)))
                    }
                }
            }

            // ================================================================
            // Stripe
            // ================================================================
            Self::Stripe { limit, total } => {
                // Wait out Stripe's pacing window before touching the page.
                tokio::select! {
                    () = cancel.cancelled() => return Err(Error::Cancelled),
                    () = sleep(STRIPE_PAGE_DELAY) => {}
                }

                let data = response.get("data").and_then(Value::as_array);
                let page = match data {
                    Some(items) => PageRecords::Records(items.clone()),
                    None => PageRecords::Missing,
                };
                // The cursor comes from the page just received, never from
                // the merged total.
                let next_cursor = data
                    .and_then(|items| items.last())
                    .and_then(|last| last.get("id"))
                    .map(query_value);
                let has_more = !extract::is_falsy(response.get("has_more"));

                match accumulate::merge(std::mem::take(total), page, *limit) {
                    Outcome::Continue(records) if has_more => {
                        *total = records;
                        match next_cursor {
                            Some(cursor) => {
                                request.query.insert("starting_after".to_string(), cursor);
                            }
                            None => {
                                request.query.remove("starting_after");
                            }
                        }
                        Ok(Step::Continue)
                    }
                    Outcome::Continue(records) | Outcome::Finished(records) => {
                        let mut envelope = response;
                        if let Value::Object(object) = &mut envelope {
                            object.insert("data".to_string(), Value::Array(records));
                        }
                        Ok(Step::Finished(AggregatedResult::Envelope(envelope)))
                    }
                }
            }
        }
    }
}

/// Fetch a named string parameter, rejecting absent or empty values
fn require(value: &Option<String>, field: &str) -> Result<String> {
    value
        .clone()
        .none_if_empty()
        .ok_or_else(|| Error::missing_field(field))
}

/// Single-array extraction: the page's records or the missing marker
fn single_page(response: &Value) -> PageRecords {
    match extract::last_array(response) {
        Some((_, items)) => PageRecords::Records(items.clone()),
        None => PageRecords::Missing,
    }
}

/// Numeric value of a query field; absent or unparsable counts as 0
fn query_number(request: &RequestDescriptor, param: &str) -> u64 {
    request
        .query
        .get(param)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Render a JSON value the way it would appear in a query string
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Resolve a next-page link against the URL it was served from
fn absolute_url(current: &str, link: &str) -> Result<String> {
    match Url::parse(link) {
        Ok(url) => Ok(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(current)?;
            Ok(base.join(link)?.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write each tracked array back into the envelope under its own key
fn write_arrays(envelope: &mut Value, totals: &mut Vec<(String, Vec<Value>)>) {
    if let Value::Object(object) = envelope {
        for (key, records) in std::mem::take(totals) {
            object.insert(key, Value::Array(records));
        }
    }
}

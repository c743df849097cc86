//! Running-total bookkeeping for single-array strategies
//!
//! One merge step per page: duplicate detection guards against providers
//! that ignore the offset and keep serving the same records, the limit caps
//! the total, and a page without any record array ends the run with a `null`
//! marker appended.

use serde_json::Value;

/// Records extracted from one page, or the marker for a page without any
#[derive(Debug, Clone, PartialEq)]
pub enum PageRecords {
    /// No array-valued key was present in the response
    Missing,
    /// The extracted records, possibly empty
    Records(Vec<Value>),
}

/// What the accumulator decided after merging one page
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Keep fetching, carrying the running total so far
    Continue(Vec<Value>),
    /// Stop, yielding the final capped total
    Finished(Vec<Value>),
}

/// Merge one page into the running total.
///
/// Checks run in priority order: a page deep-equal to the whole running
/// total ends the run without re-appending it; a missing page appends one
/// `null` marker and ends the run; an empty page ends the run; a non-zero
/// `limit` truncates the merged total to exactly `limit` records and ends
/// the run once reached. `limit == 0` means unlimited.
pub fn merge(total: Vec<Value>, page: PageRecords, limit: usize) -> Outcome {
    let records = match page {
        PageRecords::Missing => {
            let mut total = total;
            total.push(Value::Null);
            return Outcome::Finished(total);
        }
        PageRecords::Records(records) => records,
    };

    if records == total {
        return Outcome::Finished(total);
    }

    if records.is_empty() {
        return Outcome::Finished(total);
    }

    let mut merged = total;
    merged.extend(records);

    if limit > 0 && merged.len() >= limit {
        merged.truncate(limit);
        return Outcome::Finished(merged);
    }

    Outcome::Continue(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn records(values: &[i64]) -> Vec<Value> {
        values.iter().map(|v| json!(v)).collect()
    }

    #[test]
    fn test_merge_continues_below_limit() {
        let outcome = merge(records(&[1, 2]), PageRecords::Records(records(&[3, 4])), 0);
        assert_eq!(outcome, Outcome::Continue(records(&[1, 2, 3, 4])));
    }

    #[test]
    fn test_duplicate_page_stops_without_reappending() {
        let outcome = merge(
            records(&[1, 2, 3]),
            PageRecords::Records(records(&[1, 2, 3])),
            0,
        );
        assert_eq!(outcome, Outcome::Finished(records(&[1, 2, 3])));
    }

    #[test]
    fn test_duplicate_compares_against_whole_total() {
        // Equal to the previous page but not the total: merge normally.
        let outcome = merge(
            records(&[1, 2, 1, 2]),
            PageRecords::Records(records(&[1, 2])),
            0,
        );
        assert_eq!(outcome, Outcome::Continue(records(&[1, 2, 1, 2, 1, 2])));
    }

    #[test]
    fn test_empty_page_stops() {
        let outcome = merge(records(&[1, 2]), PageRecords::Records(Vec::new()), 0);
        assert_eq!(outcome, Outcome::Finished(records(&[1, 2])));
    }

    #[test]
    fn test_first_empty_page_yields_empty_total() {
        let outcome = merge(Vec::new(), PageRecords::Records(Vec::new()), 0);
        assert_eq!(outcome, Outcome::Finished(Vec::new()));
    }

    #[test]
    fn test_limit_truncates_to_exactly_limit() {
        let outcome = merge(
            records(&[1, 2, 3]),
            PageRecords::Records(records(&[4, 5, 6])),
            5,
        );
        assert_eq!(outcome, Outcome::Finished(records(&[1, 2, 3, 4, 5])));
    }

    #[test]
    fn test_limit_reached_exactly_stops() {
        let outcome = merge(records(&[1]), PageRecords::Records(records(&[2])), 2);
        assert_eq!(outcome, Outcome::Finished(records(&[1, 2])));
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let big: Vec<Value> = (0..1000).map(|v| json!(v)).collect();
        let outcome = merge(Vec::new(), PageRecords::Records(big.clone()), 0);
        assert_eq!(outcome, Outcome::Continue(big));
    }

    #[test]
    fn test_missing_page_appends_null_marker() {
        let outcome = merge(records(&[1, 2]), PageRecords::Missing, 0);
        assert_eq!(
            outcome,
            Outcome::Finished(vec![json!(1), json!(2), Value::Null])
        );
    }

    #[test]
    fn test_missing_first_page_yields_single_null() {
        let outcome = merge(Vec::new(), PageRecords::Missing, 0);
        assert_eq!(outcome, Outcome::Finished(vec![Value::Null]));
    }
}

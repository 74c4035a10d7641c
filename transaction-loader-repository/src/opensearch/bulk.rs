//! Bulk request body construction and response parsing.
//!
//! The bulk API takes newline-delimited JSON: one action descriptor line
//! followed by one document line per record.

use serde_json::{json, Value};
use transaction_loader_shared::TransactionRecord;

use crate::errors::SearchIndexError;
use crate::types::{BulkIndexSummary, DocumentFailure};

/// Build the bulk operations for a batch.
///
/// Returns `2 * records.len()` values, alternating an `index` action naming the
/// target index and the record itself, in batch order.
pub fn bulk_operations(
    index: &str,
    records: &[TransactionRecord],
) -> Result<Vec<Value>, SearchIndexError> {
    let mut operations = Vec::with_capacity(records.len() * 2);

    for record in records {
        operations.push(json!({ "index": { "_index": index } }));
        let document = serde_json::to_value(record)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
        operations.push(document);
    }

    Ok(operations)
}

/// Parse a bulk response body into a summary.
///
/// When the top-level `errors` flag is false every document was indexed.
/// Otherwise each entry of `items` is checked for an `error` object, and its
/// index in `items` is reported as the document's position in the batch.
pub fn parse_bulk_response(
    body: &Value,
    total: usize,
) -> Result<BulkIndexSummary, SearchIndexError> {
    let has_errors = body
        .get("errors")
        .and_then(Value::as_bool)
        .ok_or_else(|| SearchIndexError::parse("Bulk response has no 'errors' flag"))?;

    if !has_errors {
        return Ok(BulkIndexSummary::all_succeeded(total));
    }

    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::parse("Bulk response reported errors but has no 'items'"))?;

    let failures: Vec<DocumentFailure> = items
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            // Each item is keyed by its action name, e.g. {"index": {...}}
            let result = item.as_object()?.values().next()?;
            let error = result.get("error").filter(|e| !e.is_null())?;

            Some(DocumentFailure {
                position,
                status: result
                    .get("status")
                    .and_then(Value::as_u64)
                    .and_then(|s| u16::try_from(s).ok())
                    .unwrap_or(0),
                error_type: error
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                reason: error
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string()),
            })
        })
        .collect();

    let failed = failures.len();
    Ok(BulkIndexSummary {
        total,
        succeeded: total.saturating_sub(failed),
        failed,
        failures,
    })
}

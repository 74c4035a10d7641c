//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use transaction_loader_shared::TransactionRecord;

use crate::errors::SearchIndexError;
use crate::types::BulkIndexSummary;

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into the batch loader so it can be tested
/// against mock backends. All methods return `Result<T, SearchIndexError>`;
/// callers use [`SearchIndexError::is_transient`] to decide whether to retry.
///
/// # Index Initialization
///
/// Call `ensure_index_exists` during startup, before any bulk request, when the
/// index should be created with explicit mappings rather than dynamic ones.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the target index exists, creating it with mappings if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError)` - If the check or creation fails
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Index a batch of records with a single bulk request.
    ///
    /// The records are sent in order as one request. A request the backend
    /// accepts returns `Ok` even when individual documents were rejected; those
    /// are listed in the summary.
    ///
    /// # Arguments
    ///
    /// * `records` - The batch to index
    ///
    /// # Returns
    ///
    /// * `Ok(BulkIndexSummary)` - Per-request totals and per-document failures
    /// * `Err(SearchIndexError)` - If the request as a whole failed
    async fn bulk_index(
        &self,
        records: &[TransactionRecord],
    ) -> Result<BulkIndexSummary, SearchIndexError>;

    /// The name of the index documents are written to.
    fn index_name(&self) -> &str;
}

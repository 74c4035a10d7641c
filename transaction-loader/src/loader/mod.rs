//! Loader module for the transaction loader ingest.
//!
//! Submits batches of transaction records to the search index, retrying
//! transient failures according to a bounded [`RetryPolicy`].

mod retry;

pub use retry::RetryPolicy;

use std::sync::Arc;
use tokio_retry::RetryIf;
use tracing::{error, info, instrument, warn};

use crate::errors::IngestError;
use transaction_loader_repository::{DocumentFailure, SearchIndexError, SearchIndexProvider};
use transaction_loader_shared::TransactionRecord;

/// Configuration for the batch loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Largest batch accepted in a single bulk request.
    pub max_batch_size: usize,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 1000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of loading one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Documents the backend indexed.
    pub indexed: usize,
    /// Documents the backend rejected. These are reported, not retried.
    pub failures: Vec<DocumentFailure>,
    /// Bulk requests sent for this batch, including the successful one.
    pub attempts: usize,
}

/// Loader that indexes batches into the search engine.
///
/// The loader is responsible for:
/// - Rejecting batches larger than the configured maximum
/// - Resubmitting the same batch, unsplit and in order, on transient failures
/// - Reporting each document the backend rejected
pub struct BatchLoader {
    provider: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
}

impl BatchLoader {
    /// Create a new batch loader with the given provider and configuration.
    pub fn new(provider: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        Self { provider, config }
    }

    /// The loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load one batch into the search index.
    ///
    /// Permanent errors are returned after the first attempt; transient ones
    /// are retried until the policy's attempts run out.
    #[instrument(skip(self, batch), fields(batch_size = batch.len(), index = %self.provider.index_name()))]
    pub async fn load(&self, batch: &[TransactionRecord]) -> Result<BatchOutcome, IngestError> {
        if batch.is_empty() {
            return Ok(BatchOutcome::default());
        }

        if batch.len() > self.config.max_batch_size {
            return Err(IngestError::BatchSizeExceeded {
                provided: batch.len(),
                max: self.config.max_batch_size,
            });
        }

        let max_attempts = self.config.retry.max_attempts.max(1);
        let mut attempts = 0usize;

        let result = RetryIf::start(
            self.config.retry.delays(),
            || {
                attempts += 1;
                let attempt = attempts;
                let provider = Arc::clone(&self.provider);
                async move {
                    provider.bulk_index(batch).await.map_err(|e| {
                        let will_retry = e.is_transient() && attempt < max_attempts;
                        warn!(
                            attempt = attempt,
                            max_attempts = max_attempts,
                            transient = e.is_transient(),
                            will_retry = will_retry,
                            error = %e,
                            "Bulk request failed"
                        );
                        e
                    })
                }
            },
            |e: &SearchIndexError| e.is_transient(),
        )
        .await;

        match result {
            Ok(summary) => {
                if summary.has_failures() {
                    warn!(
                        succeeded = summary.succeeded,
                        failed = summary.failed,
                        "Bulk request completed with rejected documents"
                    );
                    for failure in &summary.failures {
                        error!(
                            position = failure.position,
                            status = failure.status,
                            error_type = %failure.error_type,
                            reason = %failure.reason,
                            "Document failed to index"
                        );
                    }
                } else {
                    info!(count = summary.succeeded, attempts = attempts, "Indexed batch");
                }

                Ok(BatchOutcome {
                    indexed: summary.succeeded,
                    failures: summary.failures,
                    attempts,
                })
            }
            Err(e) => {
                error!(error = %e, attempts = attempts, "Giving up on batch");
                Err(IngestError::BatchFailed {
                    batch_size: batch.len(),
                    attempts,
                    source: e,
                })
            }
        }
    }
}

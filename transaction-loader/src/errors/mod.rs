//! Error types for the transaction loader ingest.

use thiserror::Error;
use transaction_loader_repository::SearchIndexError;

/// Errors that can occur while loading batches into the search index.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Error from the loader component.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// A batch was larger than the loader accepts.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// A batch could not be indexed, either because a permanent error occurred
    /// or because every allowed attempt failed.
    #[error("Batch of {batch_size} records failed after {attempts} attempt(s): {source}")]
    BatchFailed {
        batch_size: usize,
        attempts: usize,
        source: SearchIndexError,
    },
}

impl IngestError {
    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}

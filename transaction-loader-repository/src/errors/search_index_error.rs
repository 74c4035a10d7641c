//! Search index error types.
//!
//! This module defines the unified error type for all search index operations,
//! along with the transient/permanent classification the loader retries on.

use thiserror::Error;

/// Unified errors from search index operations.
///
/// Used by the `SearchIndexProvider` trait for every backend call. Variants are
/// split into transient failures, which may succeed when the same request is
/// sent again, and permanent failures, which will not.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Invalid connection settings (e.g., malformed Cloud ID or API key).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to reach the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the client timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The backend answered with a retryable status (408, 429 or 5xx).
    #[error("Service unavailable (status {status}): {body}")]
    Unavailable { status: u16, body: String },

    /// The backend rejected the credentials (401 or 403).
    #[error("Authentication error (status {status}): {body}")]
    AuthError { status: u16, body: String },

    /// Bulk request was rejected as a whole.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse response from search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search index backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Map a non-success HTTP status of a bulk request to an error.
    ///
    /// 408, 429 and 5xx are transient; 401 and 403 are authentication
    /// failures; anything else means the request itself was rejected.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::AuthError { status, body },
            408 | 429 | 500..=599 => Self::Unavailable { status, body },
            _ => Self::BulkIndexError(format!("status {}: {}", status, body)),
        }
    }

    /// Whether resubmitting the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::Timeout(_) | Self::Unavailable { .. }
        )
    }
}

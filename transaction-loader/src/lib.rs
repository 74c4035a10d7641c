//! # Transaction Loader
//!
//! Generates synthetic financial transactions and bulk loads them into an
//! Elasticsearch or OpenSearch index.
//!
//! ## Architecture
//!
//! The loader follows a Generator-Loader pattern:
//!
//! 1. **Generator**: Produces fully populated transaction records
//! 2. **Loader**: Submits batches through the bulk API with bounded retry
//! 3. **Orchestrator**: Buffers records into batches and drives the run
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`generator`]: Synthetic record generation
//! - [`loader`]: Batch submission and retry policy
//! - [`orchestrator`]: The generate, buffer and flush loop
//! - [`errors`]: Error types for the loader

pub mod config;
pub mod errors;
pub mod generator;
pub mod loader;
pub mod orchestrator;

pub use config::{Dependencies, LoaderSettings};
pub use errors::IngestError;

use thiserror::Error;

/// Errors that can occur during loader initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

//! # Transaction Loader Repository
//!
//! This crate provides the trait and implementation used to write transaction
//! records into the search index. It includes definitions for errors,
//! connection configuration, the provider interface, and a concrete
//! implementation on top of the OpenSearch bulk API (which Elasticsearch
//! clusters also accept).

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::{CloudId, ConnectionConfig, Credentials, Endpoint};
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchProvider;
pub use types::{BulkIndexSummary, DocumentFailure};

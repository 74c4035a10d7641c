//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using the OpenSearch client against an OpenSearch or Elasticsearch cluster.

mod bulk;
mod index_config;
mod provider;

pub use bulk::{bulk_operations, parse_bulk_response};
pub use index_config::get_index_settings;
pub use provider::OpenSearchProvider;

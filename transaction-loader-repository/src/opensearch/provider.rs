//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials as TransportCredentials,
    http::{
        request::JsonBody,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info};
use transaction_loader_shared::TransactionRecord;

use crate::config::{ConnectionConfig, Credentials};
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::bulk::{bulk_operations, parse_bulk_response};
use crate::opensearch::index_config::get_index_settings;
use crate::types::BulkIndexSummary;

/// OpenSearch provider implementation.
///
/// Writes transaction records to a single fixed index through the bulk API.
///
/// # Example
///
/// ```ignore
/// use transaction_loader_repository::{ConnectionConfig, Endpoint, OpenSearchProvider};
///
/// let endpoint = Endpoint::parse_url("http://localhost:9200")?;
/// let provider = OpenSearchProvider::new(ConnectionConfig::new(endpoint, "transaction_index"))?;
///
/// provider.ensure_index_exists().await?;
/// let summary = provider.bulk_index(&records).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    config: ConnectionConfig,
}

impl From<&Credentials> for TransportCredentials {
    fn from(credentials: &Credentials) -> Self {
        match credentials {
            Credentials::ApiKey { id, key } => TransportCredentials::ApiKey(id.clone(), key.clone()),
            Credentials::Basic { username, password } => {
                TransportCredentials::Basic(username.clone(), password.clone())
            }
        }
    }
}

impl OpenSearchProvider {
    /// Create a new provider for the configured endpoint and index.
    ///
    /// No request is sent; connectivity problems surface on the first call.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the transport cannot be built
    pub fn new(config: ConnectionConfig) -> Result<Self, SearchIndexError> {
        let conn_pool = SingleNodeConnectionPool::new(config.endpoint.url().clone());
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(config.request_timeout);

        if let Some(ref credentials) = config.credentials {
            builder = builder.auth(credentials.into());
        }

        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %config.endpoint.url(),
            index = %config.index,
            authenticated = config.credentials.is_some(),
            timeout_secs = config.request_timeout.as_secs(),
            "Created OpenSearch provider"
        );

        Ok(Self { client, config })
    }

    /// Map a client error to a search index error.
    fn request_error(err: opensearch::Error) -> SearchIndexError {
        if err.is_timeout() {
            SearchIndexError::timeout(err.to_string())
        } else {
            SearchIndexError::connection(err.to_string())
        }
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    /// Create the index with the transaction mappings if it does not exist.
    ///
    /// A concurrent creation by another loader (`resource_already_exists_exception`)
    /// counts as success.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let index = self.config.index.as_str();

        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = exists.status_code();
        if status.is_success() {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }
        if status.as_u16() != 404 {
            let body = exists.text().await.unwrap_or_default();
            return Err(SearchIndexError::from_status(status.as_u16(), body));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.contains("resource_already_exists_exception") {
                debug!(index = %index, "Index created concurrently");
                return Ok(());
            }
            error!(status = %status, body = %body, "Index creation failed");
            return Err(match SearchIndexError::from_status(status.as_u16(), body) {
                SearchIndexError::BulkIndexError(msg) => SearchIndexError::index_creation(msg),
                other => other,
            });
        }

        info!(index = %index, "Created index with transaction mappings");
        Ok(())
    }

    /// Index a batch with one bulk request.
    ///
    /// Non-success HTTP statuses are classified by `SearchIndexError::from_status`;
    /// a successful response is parsed for per-document failures.
    async fn bulk_index(
        &self,
        records: &[TransactionRecord],
    ) -> Result<BulkIndexSummary, SearchIndexError> {
        if records.is_empty() {
            return Ok(BulkIndexSummary::default());
        }

        let body: Vec<JsonBody<Value>> = bulk_operations(&self.config.index, records)?
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(&self.config.index))
            .body(body)
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::from_status(status.as_u16(), error_body));
        }

        let response_body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let summary = parse_bulk_response(&response_body, records.len())?;
        debug!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );
        Ok(summary)
    }

    fn index_name(&self) -> &str {
        &self.config.index
    }
}

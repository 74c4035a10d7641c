//! Dependency initialization and wiring for the transaction loader.

use std::sync::Arc;
use std::time::Duration;
use tokio_retry::RetryIf;
use tracing::{info, warn};

use crate::config::settings::{ConnectionMode, LoaderSettings};
use crate::generator::TransactionGenerator;
use crate::loader::{BatchLoader, LoaderConfig, RetryPolicy};
use crate::orchestrator::{Orchestrator, OrchestratorConfig};
use crate::IndexingError;
use transaction_loader_repository::{OpenSearchProvider, SearchIndexError, SearchIndexProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Build the provider, loader and orchestrator from settings.
    ///
    /// When `create_index` is set, the index is checked (and created) before
    /// returning, honouring the configured connection mode.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new(settings: &LoaderSettings) -> Result<Self, IndexingError> {
        info!(
            url = %settings.connection.endpoint.url(),
            index = %settings.connection.index,
            total_records = settings.total_records,
            batch_size = settings.batch_size,
            max_attempts = settings.retry.max_attempts,
            connection_mode = ?settings.connection_mode,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(settings.connection.clone()).map_err(|e| {
            IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
        })?;

        if settings.create_index {
            Self::ensure_index(
                &provider,
                settings.connection_mode,
                settings.connection_retry_interval,
                settings.connection_max_attempts,
            )
            .await?;
        }

        let loader = BatchLoader::new(
            Arc::new(provider),
            LoaderConfig {
                max_batch_size: settings.batch_size,
                retry: settings.retry.clone(),
            },
        );

        let generator = match settings.generator_seed {
            Some(seed) => TransactionGenerator::seeded(seed),
            None => TransactionGenerator::new(),
        };

        let orchestrator = Orchestrator::new(
            generator,
            loader,
            OrchestratorConfig {
                total_records: settings.total_records,
                batch_size: settings.batch_size,
            },
        );

        Ok(Self { orchestrator })
    }

    /// Ensure the index exists, retrying transient failures in retry mode.
    ///
    /// Retry mode makes at most `max_attempts` attempts, `retry_interval`
    /// apart; fail-fast mode makes one. Credentials that may write documents
    /// but not inspect the index (401/403) are logged and startup continues,
    /// since the bulk requests are all the loader needs. Other permanent
    /// failures are returned immediately in either mode.
    async fn ensure_index(
        provider: &dyn SearchIndexProvider,
        mode: ConnectionMode,
        retry_interval: Duration,
        max_attempts: usize,
    ) -> Result<(), IndexingError> {
        let policy = match mode {
            ConnectionMode::Retry => RetryPolicy::fixed(max_attempts, retry_interval),
            ConnectionMode::FailFast => RetryPolicy::no_retry(),
        };
        let max_attempts = policy.max_attempts.max(1);
        let mut attempts = 0usize;

        let result = RetryIf::start(
            policy.delays(),
            || {
                attempts += 1;
                let attempt = attempts;
                async move {
                    provider.ensure_index_exists().await.inspect_err(|e| {
                        warn!(
                            index = %provider.index_name(),
                            attempt = attempt,
                            max_attempts = max_attempts,
                            transient = e.is_transient(),
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to reach search cluster"
                        );
                    })
                }
            },
            |e: &SearchIndexError| e.is_transient(),
        )
        .await;

        match result {
            Ok(()) => {
                info!(index = %provider.index_name(), attempts = attempts, "Index ready");
                Ok(())
            }
            Err(SearchIndexError::AuthError { status, .. }) => {
                warn!(
                    index = %provider.index_name(),
                    status = status,
                    "Not permitted to check or create the index, continuing with bulk requests"
                );
                Ok(())
            }
            Err(e) => Err(IndexingError::config(format!(
                "Failed to ensure index exists after {} attempt(s): {}",
                attempts, e
            ))),
        }
    }
}

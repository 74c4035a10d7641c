//! Transaction Loader Main Entry Point
//!
//! Generates synthetic transactions and bulk loads them into the configured
//! Elasticsearch or OpenSearch index.

use dotenv::dotenv;
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transaction_loader::{Dependencies, IndexingError, LoaderSettings};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("transaction_loader=info,transaction_loader_repository=info")
    });

    let json = env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "transaction-loader",
        service_version = env!("CARGO_PKG_VERSION"),
        json = json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let settings = LoaderSettings::from_env().inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;

    let mut deps = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let shutdown = deps.orchestrator.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C, shutting down");
            let _ = shutdown.send(());
        }
    });

    match deps.orchestrator.run().await {
        Ok(summary) if summary.interrupted => {
            warn!(
                records_generated = summary.records_generated,
                documents_indexed = summary.documents_indexed,
                "Transaction load interrupted"
            );
            Ok(())
        }
        Ok(summary) => {
            info!(
                documents_indexed = summary.documents_indexed,
                documents_failed = summary.documents_failed,
                batches_submitted = summary.batches_submitted,
                "Successfully indexed"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Transaction load failed");
            Err(e.into())
        }
    }
}

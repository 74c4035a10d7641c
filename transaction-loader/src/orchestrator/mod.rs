//! Orchestrator module for the transaction loader.
//!
//! Drives the generate, buffer and flush loop.

use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::errors::IngestError;
use crate::generator::TransactionGenerator;
use crate::loader::BatchLoader;
use transaction_loader_shared::TransactionRecord;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Records to generate over the whole run.
    pub total_records: usize,
    /// Records per bulk request.
    pub batch_size: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            total_records: 10_000,
            batch_size: 500,
        }
    }
}

/// Totals for a completed (or interrupted) run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub records_generated: usize,
    pub batches_submitted: usize,
    pub documents_indexed: usize,
    pub documents_failed: usize,
    /// Set when a shutdown signal stopped the run early.
    pub interrupted: bool,
}

/// Orchestrator that generates records and hands full batches to the loader.
///
/// The orchestrator:
/// - Appends each generated record to a buffer bounded by the batch size
/// - Flushes the buffer whenever it fills, and once more at the end
/// - Stops early when a shutdown signal arrives
/// - Logs progress after every batch
pub struct Orchestrator {
    generator: TransactionGenerator,
    loader: BatchLoader,
    config: OrchestratorConfig,
    shutdown_tx: broadcast::Sender<()>,
    /// Subscribed at construction so signals sent before `run` are kept.
    shutdown_rx: Option<broadcast::Receiver<()>>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        generator: TransactionGenerator,
        loader: BatchLoader,
        config: OrchestratorConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Self {
            generator,
            loader,
            config,
            shutdown_tx,
            shutdown_rx: Some(shutdown_rx),
        }
    }

    /// A sender that stops the run when signalled.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Trigger a graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Run the orchestrator.
    ///
    /// Generates `total_records` records and submits them in batches of
    /// `batch_size`. A batch that cannot be indexed aborts the run.
    #[instrument(skip(self), fields(total_records = self.config.total_records, batch_size = self.config.batch_size))]
    pub async fn run(&mut self) -> Result<RunSummary, IngestError> {
        let batch_size = self.config.batch_size;
        if batch_size == 0 {
            return Err(IngestError::loader("batch size must be greater than zero"));
        }
        if batch_size > self.loader.config().max_batch_size {
            return Err(IngestError::BatchSizeExceeded {
                provided: batch_size,
                max: self.loader.config().max_batch_size,
            });
        }

        info!("Starting transaction load");

        let mut shutdown_rx = self
            .shutdown_rx
            .take()
            .unwrap_or_else(|| self.shutdown_tx.subscribe());
        let started = Instant::now();
        let mut summary = RunSummary::default();
        let mut buffer: Vec<TransactionRecord> =
            Vec::with_capacity(batch_size.min(self.config.total_records));

        for _ in 0..self.config.total_records {
            buffer.push(self.generator.generate());
            summary.records_generated += 1;

            if buffer.len() >= batch_size
                && !self
                    .dispatch(&mut buffer, &mut summary, &mut shutdown_rx, started)
                    .await?
            {
                summary.interrupted = true;
                return Ok(summary);
            }
        }

        if !buffer.is_empty()
            && !self
                .dispatch(&mut buffer, &mut summary, &mut shutdown_rx, started)
                .await?
        {
            summary.interrupted = true;
            return Ok(summary);
        }

        info!(
            records_generated = summary.records_generated,
            batches_submitted = summary.batches_submitted,
            documents_indexed = summary.documents_indexed,
            documents_failed = summary.documents_failed,
            elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
            "Transaction load complete"
        );
        Ok(summary)
    }

    /// Hand the buffer to the loader and clear it.
    ///
    /// Returns `Ok(false)` when a shutdown signal arrived before the batch
    /// finished loading; the buffer is cleared either way.
    async fn dispatch(
        &self,
        buffer: &mut Vec<TransactionRecord>,
        summary: &mut RunSummary,
        shutdown_rx: &mut broadcast::Receiver<()>,
        started: Instant,
    ) -> Result<bool, IngestError> {
        debug!(count = buffer.len(), "Flushing batch");

        let result = tokio::select! {
            biased;
            _ = shutdown_rx.recv() => None,
            result = self.loader.load(buffer.as_slice()) => Some(result),
        };
        let batch_len = buffer.len();
        buffer.clear();

        let Some(result) = result else {
            warn!(
                discarded = batch_len,
                records_generated = summary.records_generated,
                "Received shutdown signal, stopping load"
            );
            return Ok(false);
        };

        let outcome = result?;
        summary.batches_submitted += 1;
        summary.documents_indexed += outcome.indexed;
        summary.documents_failed += outcome.failures.len();

        let elapsed_secs = started.elapsed().as_secs_f64();
        let docs_per_sec = if elapsed_secs > 0.0 {
            summary.documents_indexed as f64 / elapsed_secs
        } else {
            0.0
        };

        info!(
            records_generated = summary.records_generated,
            total_records = self.config.total_records,
            documents_indexed = summary.documents_indexed,
            documents_per_sec = format!("{:.2}", docs_per_sec),
            "Processing progress"
        );
        Ok(true)
    }
}

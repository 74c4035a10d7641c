//! Integration tests for the transaction loader orchestrator.
//!
//! These tests use the real Orchestrator, BatchLoader and generator, with a
//! mock SearchIndexProvider standing in for the cluster.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use transaction_loader::errors::IngestError;
use transaction_loader::generator::TransactionGenerator;
use transaction_loader::loader::{BatchLoader, LoaderConfig, RetryPolicy};
use transaction_loader::orchestrator::{Orchestrator, OrchestratorConfig, RunSummary};
use transaction_loader_repository::{
    BulkIndexSummary, DocumentFailure, SearchIndexError, SearchIndexProvider,
};
use transaction_loader_shared::TransactionRecord;

// Mock Search Provider for testing
struct MockSearchProvider {
    responses: Mutex<VecDeque<Result<BulkIndexSummary, SearchIndexError>>>,
    submissions: Mutex<Vec<Vec<TransactionRecord>>>,
    always_fail: Option<SearchIndexError>,
    hang: bool,
}

impl MockSearchProvider {
    fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(Vec::new()),
            always_fail: None,
            hang: false,
        }
    }

    fn with_responses(responses: Vec<Result<BulkIndexSummary, SearchIndexError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::new()
        }
    }

    fn failing(error: SearchIndexError) -> Self {
        Self {
            always_fail: Some(error),
            ..Self::new()
        }
    }

    fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new()
        }
    }

    fn submissions(&self) -> Vec<Vec<TransactionRecord>> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchIndexProvider for MockSearchProvider {
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn bulk_index(
        &self,
        records: &[TransactionRecord],
    ) -> Result<BulkIndexSummary, SearchIndexError> {
        self.submissions.lock().unwrap().push(records.to_vec());

        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(ref error) = self.always_fail {
            return Err(error.clone());
        }

        let scripted = self.responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(BulkIndexSummary::all_succeeded(records.len())))
    }

    fn index_name(&self) -> &str {
        "transaction_index"
    }
}

fn orchestrator(
    provider: Arc<MockSearchProvider>,
    total_records: usize,
    batch_size: usize,
    retry: RetryPolicy,
) -> Orchestrator {
    let loader = BatchLoader::new(
        provider,
        LoaderConfig {
            max_batch_size: batch_size,
            retry,
        },
    );
    Orchestrator::new(
        TransactionGenerator::seeded(2024),
        loader,
        OrchestratorConfig {
            total_records,
            batch_size,
        },
    )
}

#[tokio::test]
async fn test_full_batches_are_submitted_exactly_once() {
    let provider = Arc::new(MockSearchProvider::new());
    let mut orchestrator = orchestrator(provider.clone(), 10_000, 500, RetryPolicy::default());

    let summary = orchestrator.run().await.unwrap();

    let submissions = provider.submissions();
    assert_eq!(submissions.len(), 20);
    assert!(submissions.iter().all(|batch| batch.len() == 500));
    assert_eq!(
        summary,
        RunSummary {
            records_generated: 10_000,
            batches_submitted: 20,
            documents_indexed: 10_000,
            documents_failed: 0,
            interrupted: false,
        }
    );
}

#[tokio::test]
async fn test_remainder_is_flushed() {
    let provider = Arc::new(MockSearchProvider::new());
    let mut orchestrator = orchestrator(provider.clone(), 1_050, 500, RetryPolicy::default());

    let summary = orchestrator.run().await.unwrap();

    let sizes: Vec<usize> = provider.submissions().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![500, 500, 50]);
    assert_eq!(summary.documents_indexed, 1_050);
}

#[tokio::test]
async fn test_no_records_means_no_requests() {
    let provider = Arc::new(MockSearchProvider::new());
    let mut orchestrator = orchestrator(provider.clone(), 0, 500, RetryPolicy::default());

    let summary = orchestrator.run().await.unwrap();

    assert!(provider.submissions().is_empty());
    assert_eq!(summary, RunSummary::default());
}

#[tokio::test]
async fn test_batches_never_exceed_batch_size() {
    let provider = Arc::new(MockSearchProvider::new());
    let mut orchestrator = orchestrator(provider.clone(), 997, 64, RetryPolicy::default());

    orchestrator.run().await.unwrap();

    let submissions = provider.submissions();
    assert!(submissions.iter().all(|batch| !batch.is_empty() && batch.len() <= 64));
    let total: usize = submissions.iter().map(Vec::len).sum();
    assert_eq!(total, 997);
}

#[tokio::test]
async fn test_every_record_submitted_once() {
    let provider = Arc::new(MockSearchProvider::new());
    let mut orchestrator = orchestrator(provider.clone(), 300, 40, RetryPolicy::default());

    orchestrator.run().await.unwrap();

    // Reference numbers are random UUIDs, so duplicates mean a record was resent.
    let references: Vec<String> = provider
        .submissions()
        .into_iter()
        .flatten()
        .map(|record| record.source_system_reference)
        .collect();
    let unique: HashSet<&String> = references.iter().collect();
    assert_eq!(references.len(), 300);
    assert_eq!(unique.len(), 300);
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_recovers_without_reordering() {
    let provider = Arc::new(MockSearchProvider::with_responses(vec![Err(
        SearchIndexError::timeout("request timed out"),
    )]));
    let mut orchestrator = orchestrator(
        provider.clone(),
        1_000,
        500,
        RetryPolicy::fixed(3, Duration::from_secs(5)),
    );

    let summary = orchestrator.run().await.unwrap();

    let submissions = provider.submissions();
    assert_eq!(submissions.len(), 3);
    assert_eq!(submissions[0], submissions[1]);
    assert_eq!(summary.batches_submitted, 2);
    assert_eq!(summary.documents_indexed, 1_000);
}

#[tokio::test(start_paused = true)]
async fn test_persistent_failure_surfaces_after_retry_limit() {
    let provider = Arc::new(MockSearchProvider::failing(SearchIndexError::from_status(
        503,
        "cluster unavailable",
    )));
    let mut orchestrator = orchestrator(
        provider.clone(),
        1_000,
        500,
        RetryPolicy::fixed(4, Duration::from_secs(5)),
    );

    let result = orchestrator.run().await;

    assert!(matches!(
        result,
        Err(IngestError::BatchFailed {
            batch_size: 500,
            attempts: 4,
            ..
        })
    ));
    assert_eq!(provider.submissions().len(), 4);
}

#[tokio::test]
async fn test_permanent_failure_aborts_after_one_attempt() {
    let provider = Arc::new(MockSearchProvider::failing(SearchIndexError::from_status(
        401,
        "invalid credentials",
    )));
    let mut orchestrator = orchestrator(provider.clone(), 1_000, 500, RetryPolicy::default());

    let result = orchestrator.run().await;

    assert!(matches!(
        result,
        Err(IngestError::BatchFailed { attempts: 1, .. })
    ));
    assert_eq!(provider.submissions().len(), 1);
}

#[tokio::test]
async fn test_document_failures_are_counted() {
    let failure = DocumentFailure {
        position: 7,
        status: 400,
        error_type: "mapper_parsing_exception".to_string(),
        reason: "failed to parse field [Amt]".to_string(),
    };
    let provider = Arc::new(MockSearchProvider::with_responses(vec![Ok(
        BulkIndexSummary {
            total: 100,
            succeeded: 99,
            failed: 1,
            failures: vec![failure],
        },
    )]));
    let mut orchestrator = orchestrator(provider.clone(), 200, 100, RetryPolicy::default());

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(provider.submissions().len(), 2);
    assert_eq!(summary.documents_indexed, 199);
    assert_eq!(summary.documents_failed, 1);
}

#[tokio::test]
async fn test_batch_size_above_loader_limit_is_rejected() {
    let provider = Arc::new(MockSearchProvider::new());
    let loader = BatchLoader::new(
        provider.clone(),
        LoaderConfig {
            max_batch_size: 100,
            retry: RetryPolicy::default(),
        },
    );
    let mut orchestrator = Orchestrator::new(
        TransactionGenerator::seeded(1),
        loader,
        OrchestratorConfig {
            total_records: 1_000,
            batch_size: 500,
        },
    );

    let result = orchestrator.run().await;

    assert!(matches!(
        result,
        Err(IngestError::BatchSizeExceeded {
            provided: 500,
            max: 100
        })
    ));
    assert!(provider.submissions().is_empty());
}

#[tokio::test]
async fn test_shutdown_interrupts_hanging_batch() {
    let provider = Arc::new(MockSearchProvider::hanging());
    let mut orchestrator = orchestrator(provider.clone(), 1_000, 100, RetryPolicy::default());
    let shutdown = orchestrator.shutdown_handle();

    let handle = tokio::spawn(async move { orchestrator.run().await });
    shutdown.send(()).unwrap();

    let summary = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("run should stop after shutdown")
        .unwrap()
        .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.batches_submitted, 0);
    assert_eq!(summary.records_generated, 100);
}

#[tokio::test]
async fn test_huge_batch_size_with_few_records() {
    let provider = Arc::new(MockSearchProvider::new());
    let mut orchestrator = orchestrator(provider.clone(), 10, usize::MAX / 2, RetryPolicy::default());

    let summary = orchestrator.run().await.unwrap();

    let sizes: Vec<usize> = provider.submissions().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![10]);
    assert_eq!(summary.documents_indexed, 10);
}

//! Response types for bulk index operations.

/// A document the backend rejected inside an otherwise successful bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFailure {
    /// Zero-based position of the document in the submitted batch.
    pub position: usize,
    /// Per-item HTTP status reported by the backend.
    pub status: u16,
    /// Backend error type (e.g., `mapper_parsing_exception`).
    pub error_type: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Summary of a bulk index request.
///
/// Provides the total number of documents sent, how many were accepted and
/// rejected, and one [`DocumentFailure`] per rejected document so callers can
/// report exactly which documents failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkIndexSummary {
    /// Total number of documents in the request.
    pub total: usize,
    /// Number of documents indexed.
    pub succeeded: usize,
    /// Number of documents rejected.
    pub failed: usize,
    /// Details of each rejected document.
    pub failures: Vec<DocumentFailure>,
}

impl BulkIndexSummary {
    /// A summary where every document was indexed.
    pub fn all_succeeded(total: usize) -> Self {
        Self {
            total,
            succeeded: total,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// Whether the backend rejected any document.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

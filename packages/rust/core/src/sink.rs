//! Ingestion sink contract.
//!
//! The sink receives the finished batch of documents exactly once, at the
//! end of a crawl session. It is responsible for durable storage (and, in
//! richer deployments, embedding); the pipeline makes no assumption beyond
//! "eventually durable" and does not retry a failed ingest.

use std::future::Future;

use sitecorpus_shared::{Document, Result};
use sitecorpus_storage::Storage;

/// Receives the finished batch of documents for storage.
///
/// An empty batch must be a successful no-op. The sink performs no dedup of
/// its own: re-submitting documents produces duplicates.
pub trait IngestionSink {
    /// Persist the batch.
    fn ingest(&self, documents: &[Document]) -> impl Future<Output = Result<()>> + Send;
}

impl IngestionSink for Storage {
    fn ingest(&self, documents: &[Document]) -> impl Future<Output = Result<()>> + Send {
        self.ingest_documents(documents)
    }
}

//! End-to-end ingest pipeline: crawl → single terminal flush to the sink.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};
use url::Url;

use sitecorpus_crawler::Crawler;
use sitecorpus_shared::{CrawlConfig, Result};

use crate::sink::IngestionSink;

/// Configuration for a site ingest run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Seed URL; only URLs sharing its literal prefix are crawled.
    pub start_url: Url,
    /// Crawl budgets and timing.
    pub crawl: CrawlConfig,
    /// Path to the visited-URL history log.
    pub history_file: PathBuf,
}

/// Summary of a completed ingest run.
#[derive(Debug)]
pub struct IngestResult {
    /// Pages fetched and marked visited this session.
    pub pages_fetched: usize,
    /// Tasks discarded (visited, over depth, fetch failure).
    pub tasks_skipped: usize,
    /// Documents delivered to the sink.
    pub documents_ingested: usize,
    /// Per-task errors (URL, message).
    pub errors: Vec<(String, String)>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &IngestResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &IngestResult) {}
}

/// Run the full ingest pipeline.
///
/// The crawl buffers every produced document in memory; the buffer is
/// flushed to the sink exactly once, after the crawl loop exits. A sink
/// failure is fatal to the ingestion step: the visit history stays
/// committed, and the session's documents are lost.
#[instrument(skip_all, fields(url = %config.start_url))]
pub async fn ingest_site<S: IngestionSink>(
    config: &IngestConfig,
    sink: &S,
    progress: &dyn ProgressReporter,
) -> Result<IngestResult> {
    let start = Instant::now();

    progress.phase("Crawling");
    let crawler = Crawler::new(config.crawl.clone())?;
    let (crawl_result, documents) = crawler
        .crawl(&config.start_url, &config.history_file)
        .await?;

    progress.phase("Ingesting documents");
    sink.ingest(&documents).await?;

    let result = IngestResult {
        pages_fetched: crawl_result.pages_fetched,
        tasks_skipped: crawl_result.tasks_skipped,
        documents_ingested: documents.len(),
        errors: crawl_result.errors,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        pages_fetched = result.pages_fetched,
        documents_ingested = result.documents_ingested,
        errors = result.errors.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "ingest pipeline complete"
    );

    Ok(result)
}

//! End-to-end ingest orchestration for sitecorpus.
//!
//! This crate ties the crawler and the corpus store together: the crawl
//! produces a buffered batch of documents, and [`pipeline::ingest_site`]
//! flushes that batch once to an [`sink::IngestionSink`].

pub mod pipeline;
pub mod sink;

pub use pipeline::{IngestConfig, IngestResult, ProgressReporter, SilentProgress, ingest_site};
pub use sink::IngestionSink;

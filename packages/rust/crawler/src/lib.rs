//! Sequential, scope-bounded web crawler for corpus ingestion.
//!
//! This crate provides:
//! - [`scope`] — the URL validity filter gating which links are followed
//! - [`history`] — the persisted visited-URL log that makes crawls resumable
//! - [`fetch`] — the rate-limit-friendly HTTP fetcher
//! - [`extract`] — title/image/main-content extraction from raw HTML
//! - [`assemble`] — chunk-to-document assembly with provenance metadata
//! - [`engine`] — the BFS frontier driving the whole pipeline

pub mod assemble;
pub mod engine;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod scope;

pub use assemble::assemble;
pub use engine::{CrawlResult, Crawler};
pub use extract::{ExtractedContent, extract};
pub use fetch::{Fetcher, RawPage};
pub use history::HistoryLog;
pub use scope::CrawlScope;

//! Core domain types for the sitecorpus ingestion pipeline.

use serde::{Deserialize, Serialize};

/// Maximum number of image URLs carried in a document's metadata.
pub const MAX_IMAGE_URLS: usize = 10;

// ---------------------------------------------------------------------------
// CrawlTask
// ---------------------------------------------------------------------------

/// A queued unit of crawl work: a URL and its BFS distance from the seed.
///
/// Created when a link is discovered, consumed when dequeued. The seed
/// enters the queue at depth 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// Absolute URL to fetch.
    pub url: String,
    /// BFS distance from the seed URL.
    pub depth: u32,
}

impl CrawlTask {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Provenance metadata attached to every chunk of a page.
///
/// All chunks from one page share the same `source`, `title`, and
/// `image_urls`; only `chunk_index` varies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// URL of the page the chunk came from.
    pub source: String,
    /// Page title (falls back to the URL when the page has none).
    pub title: String,
    /// 0-based position of the chunk in the page's reading order.
    pub chunk_index: usize,
    /// Comma-joined absolute image URLs, capped at [`MAX_IMAGE_URLS`].
    pub image_urls: String,
}

/// One bounded chunk of extracted page content, ready for ingestion.
///
/// Immutable once assembled. Identity is not guaranteed unique: re-ingesting
/// an already-ingested URL produces duplicate documents, since dedup operates
/// at URL granularity rather than content-hash granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Markdown chunk text.
    pub content: String,
    /// Provenance metadata.
    pub metadata: DocumentMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_serialization_roundtrip() {
        let doc = Document {
            content: "# Intro\n\nSome text.".into(),
            metadata: DocumentMeta {
                source: "https://example.com/docs/intro".into(),
                title: "Introduction".into(),
                chunk_index: 2,
                image_urls: "https://example.com/a.png,https://example.com/b.png".into(),
            },
        };

        let json = serde_json::to_string(&doc).expect("serialize");
        let parsed: Document = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, doc);
        assert_eq!(parsed.metadata.chunk_index, 2);
    }

    #[test]
    fn document_json_field_names() {
        let doc = Document {
            content: "text".into(),
            metadata: DocumentMeta {
                source: "https://example.com/".into(),
                title: "Home".into(),
                chunk_index: 0,
                image_urls: String::new(),
            },
        };

        let json = serde_json::to_value(&doc).expect("serialize");
        assert!(json["metadata"]["source"].is_string());
        assert!(json["metadata"]["chunk_index"].is_number());
        assert!(json["metadata"]["image_urls"].is_string());
    }

    #[test]
    fn crawl_task_construction() {
        let task = CrawlTask::new("https://example.com/docs", 1);
        assert_eq!(task.depth, 1);
        assert_eq!(task.url, "https://example.com/docs");
    }
}

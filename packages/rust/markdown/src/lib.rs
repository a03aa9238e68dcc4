//! HTML-to-Markdown conversion and chunking.
//!
//! Converts extracted page content to Markdown using the `htmd` crate
//! (ATX-style headings), runs a series of cleanup passes, and splits the
//! result into bounded, overlapping chunks for ingestion.

mod chunk;
mod cleanup;

use tracing::{debug, instrument};
use url::Url;

use sitecorpus_shared::{Result, SiteCorpusError};

pub use chunk::{CHUNK_OVERLAP_CHARS, MAX_CHUNK_CHARS, chunk_markdown, chunk_with_limits};

/// Convert extracted content HTML to clean Markdown.
///
/// `base_url` is used to resolve relative links that survive the conversion;
/// pass `None` to leave them untouched.
#[instrument(skip(content_html))]
pub fn convert(content_html: &str, base_url: Option<&Url>) -> Result<String> {
    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "nav", "iframe", "noscript", "svg"])
        .build();

    let raw = converter
        .convert(content_html)
        .map_err(|e| SiteCorpusError::Conversion(format!("htmd conversion failed: {e}")))?;

    let cleaned = cleanup::run_pipeline(&raw, base_url);

    debug!(
        raw_len = raw.len(),
        final_len = cleaned.len(),
        "conversion complete"
    );

    Ok(cleaned)
}

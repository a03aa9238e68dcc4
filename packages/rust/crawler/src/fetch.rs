//! HTTP page fetcher.
//!
//! Performs a single GET with a bounded timeout. A non-2xx response and a
//! network/timeout failure are the same outcome for the caller: the task is
//! abandoned for this session and the URL stays unvisited.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use sitecorpus_shared::{Result, SiteCorpusError};

/// User-Agent string for crawl requests.
const USER_AGENT: &str = concat!("sitecorpus/", env!("CARGO_PKG_VERSION"));

/// A fetched page, alive only until extraction consumes it.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// The URL that was fetched.
    pub url: Url,
    /// Raw response body.
    pub html: String,
    /// HTTP status code (always 2xx here).
    pub status_code: u16,
}

/// Rate-limit-friendly page fetcher. The politeness delay between requests
/// is owned by the frontier, not by this type.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SiteCorpusError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET `url`, returning the body on any 2xx status.
    pub async fn fetch(&self, url: &Url) -> Result<RawPage> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| SiteCorpusError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteCorpusError::Network(format!("{url}: HTTP {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SiteCorpusError::Network(format!("{url}: body read failed: {e}")))?;

        Ok(RawPage {
            url: url.clone(),
            html,
            status_code: status.as_u16(),
        })
    }
}

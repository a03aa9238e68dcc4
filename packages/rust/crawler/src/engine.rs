//! BFS crawl frontier.
//!
//! The frontier owns the crawl queue and budgets, and drives the pipeline
//! strictly sequentially: one fetch, one extraction, one chunking pass at a
//! time. The only suspension points are the fetch itself and the mandatory
//! politeness delay after every fetch attempt.

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::time::{Duration, Instant};

use scraper::{Html, Selector};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use sitecorpus_markdown::chunk_markdown;
use sitecorpus_shared::{CrawlConfig, CrawlTask, Document, Result};

use crate::assemble::assemble;
use crate::extract::extract;
use crate::fetch::Fetcher;
use crate::history::HistoryLog;
use crate::scope::CrawlScope;

// ---------------------------------------------------------------------------
// CrawlResult
// ---------------------------------------------------------------------------

/// Summary of a completed crawl session.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Pages fetched successfully (and marked visited) this session.
    pub pages_fetched: usize,
    /// Tasks discarded (already visited, over depth, fetch failure, bad URL).
    pub tasks_skipped: usize,
    /// Documents buffered for ingestion.
    pub documents_produced: usize,
    /// Errors encountered (URL, error message).
    pub errors: Vec<(String, String)>,
    /// Total duration of the crawl.
    pub duration: Duration,
}

// ---------------------------------------------------------------------------
// CrawlSession
// ---------------------------------------------------------------------------

/// Mutable state owned by exactly one crawl invocation.
///
/// Nothing here is ambient or shared, so repeated crawls in one process are
/// safe. The pending set suppresses redundant enqueues of a URL discovered
/// from several pages; the visited check at dequeue stays authoritative.
struct CrawlSession {
    queue: VecDeque<CrawlTask>,
    pending: HashSet<String>,
    history: HistoryLog,
    documents: Vec<Document>,
    pages_this_session: usize,
    tasks_skipped: usize,
    errors: Vec<(String, String)>,
}

impl CrawlSession {
    fn new(seed: &Url, history: HistoryLog) -> Self {
        let mut queue = VecDeque::new();
        let mut pending = HashSet::new();
        queue.push_back(CrawlTask::new(seed.to_string(), 0));
        pending.insert(seed.to_string());

        Self {
            queue,
            pending,
            history,
            documents: Vec::new(),
            pages_this_session: 0,
            tasks_skipped: 0,
            errors: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Crawler
// ---------------------------------------------------------------------------

/// Sequential BFS crawler producing ingestion-ready documents.
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
}

impl Crawler {
    /// Create a crawler with the given configuration.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch_timeout_secs)?;
        Ok(Self { config, fetcher })
    }

    /// Crawl breadth-first from `start_url` until the queue empties or the
    /// page budget is exhausted.
    ///
    /// Returns the session summary and the buffered documents. Flushing the
    /// documents to a sink is the caller's responsibility and happens once,
    /// after the crawl.
    #[instrument(skip_all, fields(start_url = %start_url))]
    pub async fn crawl(
        &self,
        start_url: &Url,
        history_path: &Path,
    ) -> Result<(CrawlResult, Vec<Document>)> {
        let start_time = Instant::now();
        let scope = CrawlScope::new(start_url);
        let mut session = CrawlSession::new(start_url, HistoryLog::load(history_path));

        info!(
            max_depth = self.config.max_depth,
            max_pages = self.config.max_pages,
            politeness_ms = self.config.politeness_ms,
            previously_visited = session.history.len(),
            "starting crawl"
        );

        loop {
            if session.pages_this_session >= self.config.max_pages {
                break;
            }
            let Some(task) = session.queue.pop_front() else {
                break;
            };
            session.pending.remove(&task.url);
            self.process_task(&mut session, &scope, task).await?;
        }

        let result = CrawlResult {
            pages_fetched: session.pages_this_session,
            tasks_skipped: session.tasks_skipped,
            documents_produced: session.documents.len(),
            errors: session.errors,
            duration: start_time.elapsed(),
        };

        info!(
            pages_fetched = result.pages_fetched,
            tasks_skipped = result.tasks_skipped,
            documents = result.documents_produced,
            errors = result.errors.len(),
            duration_ms = result.duration.as_millis(),
            "crawl complete"
        );

        Ok((result, session.documents))
    }

    /// Process one dequeued task. A bad page never aborts the session; only
    /// environment failures (history log I/O) propagate.
    async fn process_task(
        &self,
        session: &mut CrawlSession,
        scope: &CrawlScope,
        task: CrawlTask,
    ) -> Result<()> {
        if session.history.contains(&task.url) || task.depth > self.config.max_depth {
            session.tasks_skipped += 1;
            return Ok(());
        }

        let url = match Url::parse(&task.url) {
            Ok(url) => url,
            Err(e) => {
                session.tasks_skipped += 1;
                session.errors.push((task.url.clone(), e.to_string()));
                return Ok(());
            }
        };

        debug!(url = %task.url, depth = task.depth, "processing task");

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %task.url, error = %e, "fetch failed, URL left unvisited");
                session.errors.push((task.url.clone(), e.to_string()));
                session.tasks_skipped += 1;
                self.politeness_pause().await;
                return Ok(());
            }
        };

        // Marked immediately after a successful fetch, before extraction:
        // an extraction miss still counts as visited and is never retried.
        session.history.mark(&task.url)?;
        session.pages_this_session += 1;

        if let Some(content) = extract(&page.html, &url) {
            match sitecorpus_markdown::convert(&content.main_html, Some(&url)) {
                Ok(markdown) => {
                    let chunks = chunk_markdown(&markdown);
                    let docs = assemble(&chunks, &content.title, &task.url, &content.image_urls);
                    debug!(url = %task.url, chunks = docs.len(), "page converted");
                    session.documents.extend(docs);

                    if task.depth < self.config.max_depth {
                        self.enqueue_links(session, scope, &page.html, &url, task.depth + 1);
                    }
                }
                Err(e) => {
                    warn!(url = %task.url, error = %e, "conversion failed, skipping page");
                    session.errors.push((task.url.clone(), e.to_string()));
                }
            }
        } else {
            debug!(url = %task.url, "no content region found");
        }

        self.politeness_pause().await;
        Ok(())
    }

    /// Discover outgoing links, normalize and filter them, and enqueue the
    /// survivors at `depth`.
    fn enqueue_links(
        &self,
        session: &mut CrawlSession,
        scope: &CrawlScope,
        html: &str,
        base_url: &Url,
        depth: u32,
    ) {
        let mut enqueued = 0usize;

        for link in discover_links(html, base_url) {
            let key = link.to_string();
            if !scope.is_valid(&link)
                || session.history.contains(&key)
                || session.pending.contains(&key)
            {
                continue;
            }
            session.pending.insert(key.clone());
            session.queue.push_back(CrawlTask::new(key, depth));
            enqueued += 1;
        }

        debug!(
            url = %base_url,
            enqueued,
            queue_len = session.queue.len(),
            "links discovered"
        );
    }

    /// Fixed global pause after every fetch attempt.
    async fn politeness_pause(&self) {
        if self.config.politeness_ms > 0 {
            sleep(Duration::from_millis(self.config.politeness_ms)).await;
        }
    }
}

/// Extract all links from a page, resolved against the base URL with
/// fragment identifiers stripped.
fn discover_links(html: &str, base_url: &Url) -> Vec<Url> {
    let doc = Html::parse_document(html);
    let link_sel = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for el in doc.select(&link_sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if href.starts_with('#') || href.starts_with("javascript:") || href.starts_with("mailto:")
        {
            continue;
        }
        if let Ok(mut resolved) = base_url.join(href) {
            resolved.set_fragment(None);
            links.push(resolved);
        }
    }
    links
}

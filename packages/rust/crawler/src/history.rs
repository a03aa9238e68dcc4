//! Persisted visited-URL log.
//!
//! The log is an append-only text file, one absolute URL per line,
//! newline-terminated. Loading reconstructs the full historical visited set
//! as the union of all prior runs; entries are never rewritten or compacted.
//! The log is single-writer: concurrent crawls against the same file are
//! not supported.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use sitecorpus_shared::{Result, SiteCorpusError};

/// The set of URLs already processed, backed by a durable append-only log.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    visited: HashSet<String>,
}

impl HistoryLog {
    /// Load the log from `path`. A missing file yields an empty set,
    /// never an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let visited: HashSet<String> = match std::fs::read_to_string(&path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => HashSet::new(),
        };

        debug!(path = %path.display(), count = visited.len(), "loaded visit history");
        Self { path, visited }
    }

    /// Whether `url` has been visited in this or any prior run.
    pub fn contains(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of visited URLs.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Record `url` as visited: append it to the log file and add it to the
    /// in-memory set. Call at most once per URL per process lifetime, and
    /// only after a successful fetch.
    pub fn mark(&mut self, url: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SiteCorpusError::io(parent, e))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SiteCorpusError::io(&self.path, e))?;

        writeln!(file, "{url}").map_err(|e| SiteCorpusError::io(&self.path, e))?;
        self.visited.insert(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_path() -> PathBuf {
        std::env::temp_dir().join(format!("sitecorpus-history-{}.txt", uuid::Uuid::now_v7()))
    }

    #[test]
    fn missing_file_loads_empty() {
        let log = HistoryLog::load(temp_log_path());
        assert!(log.is_empty());
        assert!(!log.contains("https://example.com/"));
    }

    #[test]
    fn mark_persists_across_loads() {
        let path = temp_log_path();

        let mut log = HistoryLog::load(&path);
        log.mark("https://example.com/a").unwrap();
        log.mark("https://example.com/b").unwrap();
        assert!(log.contains("https://example.com/a"));

        let reloaded = HistoryLog::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("https://example.com/a"));
        assert!(reloaded.contains("https://example.com/b"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn log_format_is_one_url_per_line() {
        let path = temp_log_path();

        let mut log = HistoryLog::load(&path);
        log.mark("https://example.com/a").unwrap();
        log.mark("https://example.com/b").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "https://example.com/a\nhttps://example.com/b\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn appends_to_existing_log() {
        let path = temp_log_path();
        std::fs::write(&path, "https://example.com/old\n").unwrap();

        let mut log = HistoryLog::load(&path);
        assert_eq!(log.len(), 1);
        log.mark("https://example.com/new").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("https://example.com/old\n"));
        assert!(content.ends_with("https://example.com/new\n"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn blank_lines_ignored_on_load() {
        let path = temp_log_path();
        std::fs::write(&path, "https://example.com/a\n\n  \nhttps://example.com/b\n").unwrap();

        let log = HistoryLog::load(&path);
        assert_eq!(log.len(), 2);

        let _ = std::fs::remove_file(&path);
    }
}

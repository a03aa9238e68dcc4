//! Application configuration for sitecorpus.
//!
//! User config lives at `~/.sitecorpus/sitecorpus.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteCorpusError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "sitecorpus.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".sitecorpus";

// ---------------------------------------------------------------------------
// Config structs (matching sitecorpus.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Crawl defaults.
    #[serde(default)]
    pub crawl: CrawlDefaultsConfig,

    /// Corpus storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// `[crawl]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlDefaultsConfig {
    /// Default maximum BFS depth from the seed URL.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Default maximum pages fetched per session.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Fixed delay after every fetch attempt, in milliseconds.
    #[serde(default = "default_politeness_ms")]
    pub politeness_ms: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for CrawlDefaultsConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            politeness_ms: default_politeness_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_max_depth() -> u32 {
    3
}
fn default_max_pages() -> usize {
    50
}
fn default_politeness_ms() -> u64 {
    500
}
fn default_fetch_timeout_secs() -> u64 {
    10
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the visited-URL history log.
    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// Path to the corpus database.
    #[serde(default = "default_corpus_db")]
    pub corpus_db: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            corpus_db: default_corpus_db(),
        }
    }
}

fn default_history_file() -> String {
    "~/.sitecorpus/visited_urls.txt".into()
}
fn default_corpus_db() -> String {
    "~/.sitecorpus/corpus.db".into()
}

// ---------------------------------------------------------------------------
// Crawl config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime crawl configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum BFS depth from the seed URL (seed = 0).
    pub max_depth: u32,
    /// Maximum pages fetched this session.
    pub max_pages: usize,
    /// Fixed delay after every fetch attempt, in milliseconds.
    pub politeness_ms: u64,
    /// Per-request timeout in seconds.
    pub fetch_timeout_secs: u64,
}

impl From<&AppConfig> for CrawlConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_depth: config.crawl.max_depth,
            max_pages: config.crawl.max_pages,
            politeness_ms: config.crawl.politeness_ms,
            fetch_timeout_secs: config.crawl.fetch_timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.sitecorpus/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SiteCorpusError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.sitecorpus/sitecorpus.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SiteCorpusError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SiteCorpusError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SiteCorpusError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SiteCorpusError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SiteCorpusError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Expand a leading `~/` in a configured path against the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

//! Shared types, error model, and configuration for sitecorpus.
//!
//! This crate is the foundation depended on by all other sitecorpus crates.
//! It provides:
//! - [`SiteCorpusError`] — the unified error type
//! - Domain types ([`Document`], [`DocumentMeta`], [`CrawlTask`])
//! - Configuration ([`AppConfig`], [`CrawlConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CrawlConfig, CrawlDefaultsConfig, StorageConfig, config_dir, config_file_path,
    expand_home, init_config, load_config, load_config_from,
};
pub use error::{Result, SiteCorpusError};
pub use types::{CrawlTask, Document, DocumentMeta, MAX_IMAGE_URLS};

//! sitecorpus CLI — website-to-knowledge-corpus ingestion tool.
//!
//! Crawls a site under a URL prefix, converts pages to chunked Markdown
//! documents, stores them in a local searchable corpus, and answers
//! free-text queries against it.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}

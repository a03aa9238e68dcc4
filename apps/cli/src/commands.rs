//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use sitecorpus_core::pipeline::{IngestConfig, IngestResult, ProgressReporter, ingest_site};
use sitecorpus_shared::{AppConfig, CrawlConfig, expand_home, init_config, load_config};
use sitecorpus_storage::Storage;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// sitecorpus — turn a website into a searchable knowledge corpus.
#[derive(Parser)]
#[command(
    name = "sitecorpus",
    version,
    about = "Crawl a website into a searchable knowledge corpus.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Crawl a site and ingest its content into the corpus.
    Crawl {
        /// Seed URL; only URLs sharing this literal prefix are followed.
        start_url: String,

        /// Maximum BFS depth from the seed (default 3).
        #[arg(long)]
        max_depth: Option<u32>,

        /// Maximum pages fetched this session (default 50).
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Query the corpus and print the top matching documents as JSON.
    Search {
        /// Free-text query.
        query: String,

        /// Maximum number of documents to return.
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sitecorpus=info",
        1 => "sitecorpus=debug",
        _ => "sitecorpus=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Crawl {
            start_url,
            max_depth,
            max_pages,
        } => cmd_crawl(&start_url, max_depth, max_pages).await,
        Command::Search { query, limit } => cmd_search(&query, limit).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_crawl(
    start_url: &str,
    max_depth: Option<u32>,
    max_pages: Option<usize>,
) -> Result<()> {
    let config = load_config()?;

    let parsed_url = Url::parse(start_url).map_err(|e| eyre!("invalid URL '{start_url}': {e}"))?;

    let mut crawl_config = CrawlConfig::from(&config);
    if let Some(depth) = max_depth {
        crawl_config.max_depth = depth;
    }
    if let Some(pages) = max_pages {
        crawl_config.max_pages = pages;
    }

    let history_file = expand_home(&config.storage.history_file);
    let db_path = expand_home(&config.storage.corpus_db);

    info!(
        url = start_url,
        max_depth = crawl_config.max_depth,
        max_pages = crawl_config.max_pages,
        "starting site ingest"
    );

    let storage = Storage::open(&db_path).await?;

    let ingest_config = IngestConfig {
        start_url: parsed_url,
        crawl: crawl_config,
        history_file,
    };

    let reporter = CliProgress::new();
    let result = ingest_site(&ingest_config, &storage, &reporter).await?;

    println!();
    println!("  Crawl session complete!");
    println!("  Pages:     {}", result.pages_fetched);
    println!("  Documents: {}", result.documents_ingested);
    println!("  Skipped:   {}", result.tasks_skipped);
    println!("  Errors:    {}", result.errors.len());
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_search(query: &str, limit: u32) -> Result<()> {
    let config = load_config()?;
    let db_path = expand_home(&config.storage.corpus_db);

    let storage = Storage::open(&db_path).await?;
    let hits = storage.search(query, limit).await?;

    info!(query, hits = hits.len(), "search complete");
    println!("{}", serde_json::to_string_pretty(&hits)?);

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _result: &IngestResult) {
        self.spinner.finish_and_clear();
    }
}

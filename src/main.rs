//! Doc-Dossier main entry point
//!
//! This is the command-line interface for the Doc-Dossier documentation harvester.

use anyhow::Context;
use clap::Parser;
use doc_dossier::config::{load_config_with_hash, validate, Config};
use doc_dossier::export::ExportFormat;
use doc_dossier::job::run_http_job;
use doc_dossier::progress::LogProgress;
use doc_dossier::url::{parse_start_url, SiteOrigin, UrlClassifier};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Doc-Dossier: documentation site harvester
///
/// Doc-Dossier crawls the pages of a documentation site reachable from a
/// starting URL and assembles their content into a single print-ready HTML
/// document or a Markdown dossier.
#[derive(Parser, Debug)]
#[command(name = "doc-dossier")]
#[command(version = "1.0.0")]
#[command(about = "Harvests a documentation site into one document", long_about = None)]
struct Cli {
    /// Start URL of the documentation site
    #[arg(value_name = "URL")]
    url: String,

    /// Output format: html (alias pdf) or markdown (alias md)
    #[arg(short, long, default_value = "html")]
    format: ExportFormat,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the artifact is written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum link hops from the start URL
    #[arg(long)]
    max_depth: Option<u32>,

    /// Crawl deadline in minutes
    #[arg(long)]
    timeout_minutes: Option<u64>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli, &config)
    } else {
        handle_job(&cli, &config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_dossier=info,warn"),
            1 => EnvFilter::new("doc_dossier=debug,info"),
            2 => EnvFilter::new("doc_dossier=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(timeout_minutes) = cli.timeout_minutes {
        config.crawler.timeout_minutes = timeout_minutes;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.display().to_string();
    }

    validate(&config).context("Invalid configuration after applying command-line overrides")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    println!("=== Doc-Dossier Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Timeout: {} minutes", config.crawler.timeout_minutes);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nFilter:");
    println!("  Skipped extensions: {}", config.filter.skip_extensions.join(", "));
    println!("  Skipped paths: {}", config.filter.skip_paths.join(", "));

    println!("\nExtraction:");
    println!("  Title selectors: {}", config.extraction.title_selectors.join(", "));
    println!("  Content selectors: {}", config.extraction.content_selectors.join(", "));
    println!("  Strip selectors: {}", config.extraction.strip_selectors.join(", "));

    println!("\nOutput:");
    println!("  Format: {}", cli.format);
    println!("  Directory: {}", config.output.directory);
    println!("  Document title: {}", config.output.document_title);

    let start_url = parse_start_url(&cli.url).context("Invalid start URL")?;
    let origin = SiteOrigin::from_url(&start_url)?;
    let classifier = UrlClassifier::new(origin, config.filter.clone());

    println!("\nStart URL: {}", start_url);
    println!("  Site host: {}", classifier.origin().host());
    if classifier.accepts(&start_url) {
        println!("  Classified as documentation");
    } else {
        println!("  Would not be followed as a link (crawled anyway as the start page)");
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main documentation job
async fn handle_job(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting {} as {} (max depth {}, timeout {} minutes)",
        cli.url,
        cli.format,
        config.crawler.max_depth,
        config.crawler.timeout_minutes
    );

    let report = run_http_job(config, &cli.url, cli.format, LogProgress)
        .await
        .with_context(|| format!("Documentation job failed for {}", cli.url))?;

    println!("✓ {} pages written to {}", report.pages, report.location);
    tracing::info!(
        "Crawl ended {:?}: {} skipped, {} URLs visited in {:?}",
        report.crawl_state,
        report.stats.pages_skipped,
        report.stats.urls_visited,
        report.stats.elapsed
    );

    Ok(())
}

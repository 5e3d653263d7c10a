//! Shop-Sweep main entry point
//!
//! This is the command-line interface for the Shop-Sweep catalog crawler.

use anyhow::Context;
use clap::Parser;
use shop_sweep::config::{load_config_with_hash, override_output_path, Config, LoggingConfig};
use shop_sweep::crawler::{crawl, Schedule};
use shop_sweep::output::print_statistics;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Shop-Sweep: a periodic e-commerce catalog crawler
///
/// Shop-Sweep crawls the configured category listings, merges each product's
/// listing data with its embedded variant prices, enriches it from the
/// product page and writes the whole catalog to a JSON document. By default
/// it runs once immediately and then again every configured interval.
#[derive(Parser, Debug)]
#[command(name = "shop-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A periodic e-commerce catalog crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Crawl once and exit instead of running on a schedule
    #[arg(long, conflicts_with = "dry_run")]
    once: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Write the catalog to this path instead of the configured one
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let config = match &cli.output {
        Some(output) => override_output_path(config, &output.display().to_string())
            .context("Invalid --output path")?,
        None => config,
    };

    setup_logging(&config.logging, cli.verbose, cli.quiet)?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("Using built-in configuration"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.once {
        handle_once(&config).await?;
    } else {
        handle_schedule(&config).await;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Console output always goes to stderr; when the logging config names a
/// file, the same events are appended to it without ANSI colours.
fn setup_logging(config: &LoggingConfig, verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let directives = if quiet {
        // Only show errors
        "error".to_string()
    } else {
        match verbose {
            0 => format!("shop_sweep={},warn", config.level),
            1 => "shop_sweep=debug,info".to_string(),
            2 => "shop_sweep=trace,debug".to_string(),
            _ => "trace".to_string(),
        }
    };
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter '{}'", directives))?;

    let file_layer = match config.file.as_deref().filter(|path| !path.is_empty()) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Shop-Sweep Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nCategories ({}):", config.categories.len());
    for entry in &config.categories {
        println!("  - {}", entry.url);
    }

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Pause between requests: {}ms", config.fetcher.request_pause_ms);

    println!("\nSchedule:");
    println!("  Every {} days", config.schedule.interval_days);

    println!("\nOutput:");
    println!("  Catalog: {}", config.output.path);
    if let Some(file) = config.logging.file.as_deref().filter(|f| !f.is_empty()) {
        println!("  Log file: {}", file);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles --once: a single crawl, then a statistics report
async fn handle_once(config: &Config) -> anyhow::Result<()> {
    let stats = crawl(config).await.context("Crawl failed")?;
    print_statistics(&stats);
    Ok(())
}

/// Handles the default mode: crawl now, then every configured interval
async fn handle_schedule(config: &Config) {
    let schedule = Schedule::every_days(config.schedule.interval_days);
    tracing::info!(
        "Crawling now and then every {} days",
        config.schedule.interval_days
    );

    schedule
        .run(move || async move {
            match crawl(config).await {
                Ok(stats) => tracing::info!(
                    "Scheduled crawl saved {} products to {}",
                    stats.products_saved,
                    config.output.path
                ),
                Err(e) => tracing::error!("Scheduled crawl failed: {}", e),
            }
        })
        .await;
}

//! link-health main entry point
//!
//! This is the command-line interface for the link-health checker.

use anyhow::{Context, Result};
use clap::Parser;
use link_health::checker::LinkChecker;
use link_health::config::{load_config_with_hash, validate, Config};
use link_health::output::{
    log_statistics, print_statistics, read_report, sinks_from_config, write_report,
};
use link_health::source::{flatten_urls, link_pairs, JsonFileSource, LinkSource};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// link-health: checks a curated link directory and writes a health report
///
/// Every link is probed with HEAD (falling back to GET) and retried with
/// exponential backoff. A failing link is recorded in the report; only
/// problems reading the directory or writing the report fail the run.
#[derive(Parser, Debug)]
#[command(name = "link-health")]
#[command(version = "1.0.0")]
#[command(about = "Checks a link directory and writes a health report", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Link directory to read, overriding the config
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Health report to write, overriding the config
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Markdown summary to write, overriding the config
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and list the links that would be checked, without probing
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics of the existing report and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_check(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_health=info,warn"),
            1 => EnvFilter::new("link_health=debug,info"),
            2 => EnvFilter::new("link_health=trace,debug"),
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

/// Loads the config file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(input) = &cli.input {
        config.input.path = input.display().to_string();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Reads the link directory and flattens it to the URLs to check
fn load_urls(config: &Config) -> Result<Vec<String>> {
    let source = JsonFileSource::new(&config.input.path);
    let groups = source
        .load()
        .with_context(|| format!("failed to read links from {}", source.path().display()))?;
    let urls = flatten_urls(&groups);
    tracing::info!(
        "Loaded {} unique link(s) from {} group(s)",
        urls.len(),
        groups.len()
    );
    Ok(urls)
}

/// Handles the --dry-run mode: validates inputs and lists the links
fn handle_dry_run(config: &Config) -> Result<()> {
    println!("=== link-health Dry Run ===\n");

    println!("Checker Configuration:");
    println!("  Concurrency: {}", config.checker.concurrency);
    println!("  Timeout: {}ms", config.checker.timeout_ms);
    println!(
        "  Attempts per link: {} (backoff base {}ms, jitter <{}ms)",
        config.checker.retries + 1,
        config.checker.backoff_base_ms,
        config.checker.jitter_ms
    );
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nInput: {}", config.input.path);
    println!("Output: {}", config.output.path);
    if let Some(summary) = &config.output.summary_path {
        println!("Summary: {}", summary);
    }

    let source = JsonFileSource::new(&config.input.path);
    let groups = source
        .load()
        .with_context(|| format!("failed to read links from {}", source.path().display()))?;

    println!();
    for (group_id, url) in link_pairs(&groups) {
        println!("  [{}] {}", group_id, url);
    }

    println!(
        "\n✓ Would check {} unique link(s) from {} group(s)",
        flatten_urls(&groups).len(),
        groups.len()
    );

    Ok(())
}

/// Handles the --stats mode: summarizes the last written report
fn handle_stats(config: &Config) -> Result<()> {
    let path = Path::new(&config.output.path);
    let report = read_report(path)
        .with_context(|| format!("failed to read report {}", path.display()))?;

    println!("Report: {}", path.display());
    println!("Updated: {}\n", report.updated_at_string());
    print_statistics(&report.stats());

    Ok(())
}

/// Handles the main check operation
async fn handle_check(config: &Config) -> Result<()> {
    let urls = load_urls(config)?;

    let checker = LinkChecker::from_config(config).context("failed to build HTTP client")?;
    let report = checker.run(&urls).await;

    let sinks = sinks_from_config(&config.output);
    write_report(&report, &sinks).context("failed to write health report")?;

    log_statistics(&report);
    Ok(())
}

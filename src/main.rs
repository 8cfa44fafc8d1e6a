//! Sumi-Sieve main entry point
//!
//! Replays a manifest of recorded fetch results through the admission and
//! deduplication engine and prints the final report.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use sumi_sieve::config::{load_config_with_hash, Config};
use sumi_sieve::output::print_report;
use sumi_sieve::replay::{load_manifest, replay};
use sumi_sieve::Engine;
use tracing_subscriber::EnvFilter;

/// Sumi-Sieve: crawl admission and near-duplicate suppression
///
/// Feeds recorded pages through the link admission filter and the SimHash
/// dedup index, then prints corpus statistics.
#[derive(Parser, Debug)]
#[command(name = "sumi-sieve")]
#[command(version = "1.0.0")]
#[command(about = "Crawl admission and content deduplication", long_about = None)]
struct Cli {
    /// Path to the TOML page manifest
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the admitted links of every page
    #[arg(long)]
    links: bool,

    /// Validate config and manifest and show the settings without processing pages
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let manifest = load_manifest(&cli.manifest)
        .with_context(|| format!("Failed to load manifest {}", cli.manifest.display()))?;

    if cli.dry_run {
        print_dry_run(&config, manifest.pages.len());
        return Ok(());
    }

    let tracked_domain = config.stats.tracked_domain.clone();
    let engine = Arc::new(Engine::new(config));
    let records = replay(Arc::clone(&engine), manifest)
        .await
        .context("Replay failed")?;

    if cli.links {
        for record in &records {
            println!("{} [{}]", record.url, record.outcome);
            for link in &record.links {
                println!("  {}", link);
            }
        }
        println!();
    }

    print_report(&engine.snapshot(), &tracked_domain);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sieve=info,warn"),
            1 => EnvFilter::new("sumi_sieve=debug,info"),
            2 => EnvFilter::new("sumi_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles --dry-run: shows the effective settings
fn print_dry_run(config: &Config, pages: usize) {
    println!("=== Sumi-Sieve Dry Run ===\n");

    println!("Engine:");
    println!("  Max body bytes: {}", config.engine.max_body_bytes);
    println!(
        "  Max concurrent pages: {}",
        config.engine.max_concurrent_pages
    );

    println!("\nAdmission:");
    println!("  Domain match: {:?}", config.admission.domain_match);
    println!("  Max query params: {}", config.admission.max_query_params);
    println!("  Max path segments: {}", config.admission.max_path_segments);
    println!(
        "\nAllowed Domains ({}):",
        config.admission.allowed_domains.len()
    );
    for domain in &config.admission.allowed_domains {
        println!("  - {}", domain);
    }

    println!("\nDedup:");
    println!("  Fingerprint: {}", config.dedup.fingerprint_bits);
    println!("  Hamming threshold: {}", config.dedup.hamming_threshold);
    println!("  Index: {:?}", config.dedup.index);

    println!("\nStats:");
    println!("  Tracked domain: {}", config.stats.tracked_domain);
    println!("  Top words: {}", config.stats.top_words);

    println!("\nManifest pages: {}", pages);
}

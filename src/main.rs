//! linkscour command-line interface.

use anyhow::Context;
use clap::Parser;
use linkscour::config::CrawlConfig;
use linkscour::crawler::Crawler;
use linkscour::output::{render_tree, write_json, BatchResults};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Crawl one or more sites and report every broken link.
#[derive(Parser, Debug)]
#[command(name = "linkscour")]
#[command(version)]
#[command(about = "Recursive broken-link auditor", long_about = None)]
struct Cli {
    /// Seed URLs to validate
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Read seed URLs from a file, one per line (malformed lines are skipped)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// How deep to follow links from each seed
    #[arg(long, default_value_t = 3)]
    deep: u32,

    /// The HTTP timeout in seconds
    #[arg(long, default_value_t = 10.0)]
    timeout: f64,

    /// Directory to write result.json into, or "stdout" to print a tree
    #[arg(long, default_value = "stdout")]
    output: String,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let seeds = gather_seeds(&cli)?;
    if seeds.is_empty() {
        anyhow::bail!("no valid seed URLs given (pass URLs or --input <file>)");
    }

    let config = CrawlConfig::new(cli.deep, cli.timeout);
    let crawler = Crawler::new(config)?;

    let mut results = BatchResults::new();
    for seed in seeds {
        tracing::info!(%seed, "validating");
        match crawler.validate(&seed).await {
            Ok(report) => {
                results.insert(seed, report);
            }
            Err(e) => tracing::error!(%seed, error = %e, "skipping seed"),
        }
    }

    if cli.output == "stdout" {
        print!("{}", render_tree(&results));
    } else {
        let path = write_json(Path::new(&cli.output), &results)
            .with_context(|| format!("writing results under {}", cli.output))?;
        tracing::info!(path = %path.display(), "results written");
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkscour=info,warn"),
            1 => EnvFilter::new("linkscour=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Collects seed URLs from positional arguments and the optional input
/// file. Entries that do not parse as absolute URLs are dropped with a
/// warning before they reach the crawl core.
fn gather_seeds(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut seeds = Vec::new();

    for raw in &cli.urls {
        push_if_well_formed(&mut seeds, raw);
    }

    if let Some(path) = &cli.input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        for line in content.lines() {
            let line = line.trim();
            if !line.is_empty() {
                push_if_well_formed(&mut seeds, line);
            }
        }
    }

    Ok(seeds)
}

fn push_if_well_formed(seeds: &mut Vec<String>, raw: &str) {
    if Url::parse(raw).is_ok() {
        seeds.push(raw.to_string());
    } else {
        tracing::warn!(url = raw, "dropping malformed URL");
    }
}

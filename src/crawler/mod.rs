//! Crawling core: HTTP fetching, link extraction, and the recursive
//! validation engine.

mod engine;
mod extractor;
mod fetcher;

pub use engine::Crawler;
pub use extractor::{extract_links, ExtractedLink};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};

use crate::config::CrawlConfig;
use crate::report::Report;
use crate::Result;

/// Validates a single seed URL with a fresh session.
///
/// Convenience wrapper over [`Crawler`]; batch callers should build one
/// `Crawler` and call [`Crawler::validate`] per seed so the HTTP client is
/// reused.
pub async fn validate(url: &str, config: CrawlConfig) -> Result<Report> {
    Crawler::new(config)?.validate(url).await
}

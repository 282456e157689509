//! Crawl configuration.
//!
//! A [`CrawlConfig`] is immutable for the lifetime of a [`crate::Crawler`];
//! there is no other runtime configuration.

use std::time::Duration;

/// Configuration for a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum link-following depth from the seed (the seed itself is depth 0)
    pub max_depth: u32,

    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            timeout: Duration::from_secs(10),
        }
    }
}

impl CrawlConfig {
    /// Builds a config from CLI-style values: a depth and a timeout in seconds.
    pub fn new(max_depth: u32, timeout_secs: f64) -> Self {
        Self {
            max_depth,
            timeout: Duration::from_secs_f64(timeout_secs),
        }
    }
}

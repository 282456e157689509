//! linkscour: a recursive broken-link auditor
//!
//! This crate crawls a website from a seed URL, follows `src=`/`href=`
//! references up to a configurable depth, and reports every URL whose HTTP
//! response is not in the 2xx range (including unreachable URLs), grouped
//! by the page that referenced them.

pub mod config;
pub mod crawler;
pub mod output;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for linkscour operations
#[derive(Debug, Error)]
pub enum ScourError {
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for linkscour operations
pub type Result<T> = std::result::Result<T, ScourError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{validate, Crawler};
pub use report::Report;
pub use self::url::{normalize_url, resolve};

//! Linksweep: a recursive broken-link checker
//!
//! This crate crawls a web site starting from one or more seed URLs,
//! verifying every link reachable within the site's own domain and giving
//! links that leave the site a single shallow check. Each visited URL
//! produces one outcome record (status, error, or redirect target) together
//! with the page that referenced it.

pub mod config;
pub mod crawler;
pub mod report;
pub mod robots;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for linksweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// Any of these is fatal before crawling starts. Failures concerning a
/// specific URL during the crawl are captured in that URL's
/// [`report::LinkResult`] instead and never abort the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read URL list {}: {source}", path.display())]
    SeedList {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported scheme '{0}': only http and https URLs can be checked")]
    UnsupportedScheme(String),

    #[error("Invalid ignore pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type alias for linksweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::crawl;
pub use report::LinkResult;

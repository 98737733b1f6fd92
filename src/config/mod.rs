//! Crawl configuration
//!
//! Configuration is assembled from CLI flags plus an optional seed-list
//! file. Everything here is validated before any network activity; a bad
//! seed URL or ignore pattern is fatal to the run.

mod seeds;

pub use seeds::load_seed_list;

use crate::{ConfigError, ConfigResult};
use regex::Regex;
use url::Url;

/// Settings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The crawl's primary seed; link expansion stays within its host
    /// (ignoring a leading `www.`).
    pub base_url: Url,

    /// Additional seed URLs, checked alongside the base URL at depth 0.
    pub extra_seeds: Vec<Url>,

    /// Maximum recursion depth; `None` means unbounded. Candidates beyond
    /// the limit are dropped before admission.
    pub stop_after: Option<u32>,

    /// Resolved link URLs matching this pattern are excluded from link
    /// expansion (they can still be checked when supplied as seeds).
    pub ignore: Option<Regex>,

    /// Sent as the User-Agent header on every request and used as the
    /// robots.txt agent token.
    pub user_agent: String,
}

impl CrawlConfig {
    /// Creates a configuration with no depth limit, no ignore pattern, and
    /// no extra seeds.
    pub fn new(base_url: Url, user_agent: &str) -> ConfigResult<Self> {
        validate_seed(&base_url)?;
        Ok(Self {
            base_url,
            extra_seeds: Vec::new(),
            stop_after: None,
            ignore: None,
            user_agent: user_agent.to_string(),
        })
    }
}

/// Checks that a seed URL is something the crawler can actually fetch.
pub fn validate_seed(url: &Url) -> ConfigResult<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_bases_are_accepted() {
        assert!(CrawlConfig::new(Url::parse("http://example.com/").unwrap(), "t").is_ok());
        assert!(CrawlConfig::new(Url::parse("https://example.com/").unwrap(), "t").is_ok());
    }

    #[test]
    fn other_schemes_are_rejected() {
        let err = CrawlConfig::new(Url::parse("ftp://example.com/").unwrap(), "t").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(scheme) if scheme == "ftp"));
    }

    #[test]
    fn defaults_are_unbounded_and_unfiltered() {
        let config = CrawlConfig::new(Url::parse("http://example.com/").unwrap(), "t").unwrap();
        assert!(config.stop_after.is_none());
        assert!(config.ignore.is_none());
        assert!(config.extra_seeds.is_empty());
    }
}

//! Per-host robots.txt cache
//!
//! The gate owns its own redirect-following HTTP client: robots.txt is the
//! one resource where redirects are resolved automatically instead of being
//! classified by the crawler.

use crate::crawler::build_robots_client;
use crate::robots::policy::{path_allowed, DISALLOW_ALL};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use tokio::sync::Mutex;
use url::Url;

/// Answers robots.txt allow/deny queries, fetching rules lazily per host.
pub struct RobotsGate {
    client: Client,
    user_agent: String,
    cache: Mutex<HashMap<String, String>>,
}

impl RobotsGate {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_robots_client(user_agent)?,
            user_agent: user_agent.to_string(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Checks whether `url` may be fetched.
    ///
    /// On a cache miss the host's robots.txt is fetched first. The cache
    /// lock is held across that fetch, so a host's rules are retrieved at
    /// most once per run no matter how many tasks ask concurrently.
    pub async fn is_allowed(&self, url: &Url) -> bool {
        let host = match url.host_str() {
            Some(host) => host.to_string(),
            None => return false,
        };

        let mut cache = self.cache.lock().await;
        if let Some(robots_txt) = cache.get(&host) {
            return path_allowed(robots_txt, &self.user_agent, url);
        }

        let robots_txt = self.fetch_robots_txt(url).await;
        let allowed = path_allowed(&robots_txt, &self.user_agent, url);
        cache.insert(host, robots_txt);
        allowed
    }

    /// Fetches the raw robots.txt for the host serving `url`.
    ///
    /// A 5xx answer, a 4xx other than 404, or a transport failure yields
    /// synthesized disallow-all rules: an ambiguous robots endpoint blocks
    /// the host. A 404 body (usually empty) is cached as-is and parses as
    /// no rules.
    async fn fetch_robots_txt(&self, url: &Url) -> String {
        let mut robots_url = url.clone();
        robots_url.set_path("/robots.txt");
        robots_url.set_query(None);
        robots_url.set_fragment(None);

        let response = match self.client.get(robots_url.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("failed to fetch {robots_url}: {err}; treating host as disallowed");
                return DISALLOW_ALL.to_string();
            }
        };

        let status = response.status();
        if status.is_server_error() || (status.is_client_error() && status != StatusCode::NOT_FOUND)
        {
            tracing::warn!("{robots_url} answered {status}; treating host as disallowed");
            return DISALLOW_ALL.to_string();
        }

        match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("failed to read {robots_url}: {err}; treating host as disallowed");
                DISALLOW_ALL.to_string()
            }
        }
    }
}

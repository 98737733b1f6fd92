//! Crawl orchestration
//!
//! One task runs per admitted URL: depth gate, robots gate, admission,
//! fetch, classification, and fan-out into newly discovered links. A
//! task's future resolves only after every task it spawned has resolved,
//! so the run is complete exactly when the whole reachable frontier has
//! been processed.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{
    build_page_client, classify_response, describe_transport_error, fetch_url, is_html,
    FetchOutcome,
};
use crate::crawler::frontier::{Admission, Frontier};
use crate::crawler::parser::extract_hrefs;
use crate::report::{LinkResult, ResultStore};
use crate::robots::RobotsGate;
use crate::url::{is_similar_host, resolve_href};
use futures::future::BoxFuture;
use reqwest::{Client, Response, StatusCode};
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

fn host_of(url: &Url) -> &str {
    url.host_str().unwrap_or("")
}

/// Per-run crawler state: the clients, the robots gate, the admission
/// sets, and the growing result list.
pub struct Crawler {
    config: CrawlConfig,
    client: Client,
    robots: RobotsGate,
    frontier: Frontier,
    results: ResultStore,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> crate::Result<Self> {
        let client = build_page_client(&config.user_agent)?;
        let robots = RobotsGate::new(&config.user_agent)?;
        Ok(Self {
            config,
            client,
            robots,
            frontier: Frontier::default(),
            results: ResultStore::default(),
        })
    }

    /// Checks every seed URL concurrently and returns once the frontier
    /// reachable from all of them has been fully processed.
    pub async fn run(self: Arc<Self>) {
        let mut seen = HashSet::new();
        let mut seeds = Vec::new();
        for seed in std::iter::once(&self.config.base_url).chain(self.config.extra_seeds.iter()) {
            if seen.insert(seed.as_str().to_string()) {
                seeds.push(seed.clone());
            }
        }

        tracing::info!("starting crawl with {} seed URL(s)", seeds.len());
        let handles: Vec<_> = seeds
            .into_iter()
            .map(|seed| tokio::spawn(Arc::clone(&self).check_link(None, seed, 0)))
            .collect();
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::error!("seed task panicked: {err}");
            }
        }
    }

    /// Hands the collected results to the caller.
    pub fn take_results(&self) -> Vec<LinkResult> {
        self.results.take()
    }

    fn base_host(&self) -> &str {
        host_of(&self.config.base_url)
    }

    /// Processes one candidate URL: depth gate, robots gate, admission,
    /// fetch, and classification. Recursion makes the future self-referential,
    /// hence the boxing.
    fn check_link(
        self: Arc<Self>,
        parent: Option<String>,
        url: Url,
        depth: u32,
    ) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            if let Some(limit) = self.config.stop_after {
                if depth > limit {
                    tracing::debug!("depth limit {limit} reached at {url}, dropping");
                    return;
                }
            }

            // Disallowed URLs leave no trace: no record, no set entries.
            if !self.robots.is_allowed(&url).await {
                tracing::debug!("{url} disallowed by robots.txt, dropping");
                return;
            }

            match self.frontier.try_admit(url.as_str()) {
                Admission::InFlight => {
                    tracing::debug!("{url} already being checked, skipping");
                    return;
                }
                Admission::Finalized => {
                    self.replay_finalized(parent, &url);
                    return;
                }
                Admission::Admitted => {}
            }

            tracing::info!("checking {url}");
            let response = match fetch_url(&self.client, &url).await {
                Ok(response) => response,
                Err(err) => {
                    let message = describe_transport_error(&err);
                    tracing::warn!("failed to fetch {url}: {message}");
                    self.results.push(LinkResult::failed(parent, url.as_str(), message));
                    self.frontier.finalize(url.as_str());
                    return;
                }
            };

            match classify_response(response) {
                FetchOutcome::MultipleChoices { status } => {
                    tracing::warn!("{url} answered 300 Multiple Choices; no target to follow");
                    self.results
                        .push(LinkResult::terminal(parent, url.as_str(), status));
                    self.frontier.finalize(url.as_str());
                }
                FetchOutcome::Redirect { status, location } => {
                    self.handle_redirect(parent, url, status, location, depth)
                        .await;
                }
                FetchOutcome::Terminal { response } => {
                    self.handle_terminal(parent, url, response, depth).await;
                }
            }
        })
    }

    /// Records a redirect hop and, when the redirecting page belongs to the
    /// crawl's own site, chases the target at the same depth.
    async fn handle_redirect(
        self: Arc<Self>,
        parent: Option<String>,
        url: Url,
        status: StatusCode,
        location: Option<String>,
        depth: u32,
    ) {
        // Location may be relative; resolve it against the redirecting URL.
        let target = location
            .as_deref()
            .and_then(|raw| resolve_href(raw, &url, false));

        let record = match &target {
            Some(target) => LinkResult::redirect(parent, url.as_str(), status, target.as_str()),
            None => {
                tracing::warn!("{url} redirected without a usable Location header");
                LinkResult::redirect_unresolved(parent, url.as_str(), status)
            }
        };
        self.results.push(record);
        // Finalize before chasing the target: a redirect loop then replays
        // the recorded hop instead of refetching it.
        self.frontier.finalize(url.as_str());

        let target = match target {
            Some(target) => target,
            None => return,
        };

        if is_similar_host(host_of(&url), self.base_host()) {
            // Redirect hops do not consume a recursion step.
            let referrer = url.to_string();
            Arc::clone(&self)
                .check_link(Some(referrer), target, depth)
                .await;
        } else {
            tracing::debug!("{url} is off-site, not following its redirect");
        }
    }

    /// Records a terminal response and, for an on-site HTML page, expands
    /// its outbound links one recursion step deeper.
    async fn handle_terminal(
        self: Arc<Self>,
        parent: Option<String>,
        url: Url,
        response: Response,
        depth: u32,
    ) {
        let status = response.status();
        let html = is_html(response.headers());

        self.results
            .push(LinkResult::terminal(parent.clone(), url.as_str(), status));
        self.frontier.finalize(url.as_str());

        if !html {
            tracing::debug!("{url} is not an HTML page, not scanning");
            return;
        }
        if !is_similar_host(host_of(&url), self.base_host()) {
            // Off-site pages get the shallow check only.
            tracing::debug!("{url} is off-site, not scanning for links");
            return;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let message = describe_transport_error(&err);
                tracing::warn!("failed to read body of {url}: {message}");
                self.results
                    .push(LinkResult::failed(parent, url.as_str(), message));
                return;
            }
        };

        let links = self.collect_links(&body, &url);
        tracing::debug!("{url} yielded {} link(s) to check", links.len());

        // Spawn every child, then join them all: this branch is complete
        // only once every child branch is.
        let referrer = url.to_string();
        let handles: Vec<_> = links
            .into_iter()
            .map(|link| {
                tokio::spawn(Arc::clone(&self).check_link(
                    Some(referrer.clone()),
                    link,
                    depth + 1,
                ))
            })
            .collect();
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::error!("link task panicked: {err}");
            }
        }
    }

    /// Resolves, filters, and deduplicates the outbound links of a page.
    fn collect_links(&self, body: &str, page: &Url) -> HashSet<Url> {
        let mut links = HashSet::new();
        for href in extract_hrefs(body) {
            let resolved = match resolve_href(&href, page, false) {
                Some(resolved) => resolved,
                None => continue,
            };
            if let Some(ignore) = &self.config.ignore {
                if ignore.is_match(resolved.as_str()) {
                    tracing::trace!("ignoring {resolved}");
                    continue;
                }
            }
            links.insert(resolved);
        }
        links
    }

    /// Surfaces a known-broken outcome again under a new referring page, so
    /// every page holding the broken reference shows up in the report.
    fn replay_finalized(&self, parent: Option<String>, url: &Url) {
        let prior = match self.results.first_for(url.as_str()) {
            Some(prior) => prior,
            None => {
                tracing::warn!("{url} is finalized but has no stored result, skipping");
                return;
            }
        };
        if prior.is_broken() {
            tracing::debug!("replaying known-broken outcome of {url}");
            self.results.push(prior.with_parent(parent));
        }
    }
}

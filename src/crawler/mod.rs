//! Crawl engine
//!
//! This module contains the crawling core:
//! - admission and dedup of candidate URLs
//! - HTTP fetching with manual redirect classification
//! - HTML link extraction
//! - the recursive orchestration tying them together

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{
    build_page_client, build_robots_client, classify_response, describe_transport_error, fetch_url,
    is_html, FetchOutcome,
};
pub use frontier::{Admission, Frontier};
pub use parser::extract_hrefs;

use crate::config::CrawlConfig;
use crate::report::LinkResult;
use std::sync::Arc;

/// Runs a complete crawl and returns every recorded link outcome.
///
/// All seed URLs are checked concurrently at depth 0; the call returns
/// once every URL transitively reachable from them has reached an
/// absorbing state. Failures concerning individual URLs are captured in
/// their outcome records and never abort the run.
pub async fn crawl(config: CrawlConfig) -> crate::Result<Vec<LinkResult>> {
    let crawler = Arc::new(Crawler::new(config)?);
    Arc::clone(&crawler).run().await;
    Ok(crawler.take_results())
}

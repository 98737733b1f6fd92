//! HTTP fetching and response classification
//!
//! Two clients are built here: the page client never follows redirects
//! (redirect handling is the crawler's job, one classified hop at a time)
//! and the robots client follows them automatically. Both send the
//! configured User-Agent on every request.

use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// Builds the client used for page checks. Redirects surface as plain
/// responses for the crawler to classify.
pub fn build_page_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the client used for robots.txt retrieval, with automatic
/// redirect following.
pub fn build_robots_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a single GET without following redirects.
pub async fn fetch_url(client: &Client, url: &Url) -> Result<Response, reqwest::Error> {
    client.get(url.clone()).send().await
}

/// A response sorted by how the crawler must treat it.
#[derive(Debug)]
pub enum FetchOutcome {
    /// 300: server-driven negotiation, no single target to follow.
    MultipleChoices { status: StatusCode },

    /// 301/302/303/307/308 with the raw `Location` header, if present.
    Redirect {
        status: StatusCode,
        location: Option<String>,
    },

    /// Anything else; the response is kept for the optional body read.
    Terminal { response: Response },
}

/// Sorts a response into redirect and terminal classes by status code.
pub fn classify_response(response: Response) -> FetchOutcome {
    let status = response.status();
    match status.as_u16() {
        300 => FetchOutcome::MultipleChoices { status },
        301 | 302 | 303 | 307 | 308 => {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            FetchOutcome::Redirect { status, location }
        }
        // 304 carries no body; 305 and 306 are never followed, whatever
        // headers they carry.
        _ => FetchOutcome::Terminal { response },
    }
}

/// True when the Content-Type names an HTML document, ignoring parameters
/// such as charset.
pub fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|media_type| media_type.trim().eq_ignore_ascii_case("text/html"))
        .unwrap_or(false)
}

/// Renders a transport failure as `[<kind>]: <message>` for the outcome
/// record.
pub fn describe_transport_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_body() || err.is_decode() {
        "body"
    } else if err.is_request() {
        "request"
    } else {
        "transport"
    };
    format!("[{kind}]: {err}")
}

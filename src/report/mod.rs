//! Crawl outcome records and JSON rendering
//!
//! One [`LinkResult`] is recorded per (URL, discovery context) pair. The
//! collected list is the crawl's sole output; it is rendered as a JSON
//! array with `status` formatted as `"<code> <reason-phrase>"`.

use reqwest::StatusCode;
use serde::{Serialize, Serializer};
use std::sync::Mutex;

/// Outcome of checking one URL, discovered from one referring page.
#[derive(Debug, Clone, Serialize)]
pub struct LinkResult {
    /// The referring page's canonical URL; `None` for seed URLs.
    pub parent: Option<String>,

    /// The canonical URL that was checked.
    pub url: String,

    /// The HTTP status, when a response was obtained.
    #[serde(serialize_with = "serialize_status")]
    pub status: Option<StatusCode>,

    /// Why the check failed, when no usable response was obtained.
    #[serde(rename = "errorMsg")]
    pub error_msg: Option<String>,

    /// The resolved redirect target, for 3xx responses with a usable
    /// `Location` header.
    pub redirect: Option<String>,
}

impl LinkResult {
    /// A response was obtained and is not being followed further.
    pub fn terminal(parent: Option<String>, url: &str, status: StatusCode) -> Self {
        Self {
            parent,
            url: url.to_string(),
            status: Some(status),
            error_msg: None,
            redirect: None,
        }
    }

    /// The fetch (or body read) failed before a usable response existed.
    pub fn failed(parent: Option<String>, url: &str, message: String) -> Self {
        Self {
            parent,
            url: url.to_string(),
            status: None,
            error_msg: Some(message),
            redirect: None,
        }
    }

    /// A redirect response whose target resolved to a canonical URL.
    pub fn redirect(parent: Option<String>, url: &str, status: StatusCode, target: &str) -> Self {
        Self {
            parent,
            url: url.to_string(),
            status: Some(status),
            error_msg: None,
            redirect: Some(target.to_string()),
        }
    }

    /// A redirect response with a missing or unusable `Location` header.
    pub fn redirect_unresolved(parent: Option<String>, url: &str, status: StatusCode) -> Self {
        Self {
            parent,
            url: url.to_string(),
            status: Some(status),
            error_msg: Some("Couldn't determine redirect location".to_string()),
            redirect: None,
        }
    }

    /// True when this outcome should be surfaced again for every further
    /// page found referencing the same URL.
    pub fn is_broken(&self) -> bool {
        self.error_msg.is_some() || self.status.map_or(false, |status| !status.is_success())
    }

    /// Copies this record under a different referring page.
    pub fn with_parent(&self, parent: Option<String>) -> Self {
        Self {
            parent,
            ..self.clone()
        }
    }
}

fn serialize_status<S>(status: &Option<StatusCode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match status {
        Some(code) => serializer.serialize_str(&format_status(*code)),
        None => serializer.serialize_none(),
    }
}

/// Formats a status as `"<code> <reason-phrase>"`, or just the code for
/// statuses without a canonical reason.
pub fn format_status(code: StatusCode) -> String {
    match code.canonical_reason() {
        Some(reason) => format!("{} {}", code.as_u16(), reason),
        None => code.as_u16().to_string(),
    }
}

/// Append-only list of [`LinkResult`] records shared across crawl tasks.
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Mutex<Vec<LinkResult>>,
}

impl ResultStore {
    /// Appends one record. The append is atomic; no ordering is guaranteed
    /// between records appended by concurrent tasks.
    pub fn push(&self, record: LinkResult) {
        self.records.lock().unwrap().push(record);
    }

    /// Returns the first recorded outcome for `url`, if any.
    pub fn first_for(&self, url: &str) -> Option<LinkResult> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.url == url)
            .cloned()
    }

    /// Hands the collected records to the caller, leaving the store empty.
    pub fn take(&self) -> Vec<LinkResult> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }
}

/// Renders the result list as a JSON array.
pub fn to_json(results: &[LinkResult], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(results)
    } else {
        serde_json::to_string(results)
    }
}

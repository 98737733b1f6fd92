//! URL handling module
//!
//! This module turns raw `href` strings into canonical absolute URLs and
//! decides whether two hosts belong to the same site. Every other component
//! consumes URLs only in the canonical form produced here.

mod host;
mod resolve;

pub use host::is_similar_host;
pub use resolve::resolve_href;

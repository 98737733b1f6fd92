/// Strips a single leading `www.` from a host, if present.
///
/// The prefix is matched as a case-sensitive literal.
fn bare_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Compares two hosts, treating a leading `www.` as nonexistent.
///
/// `www.example.com` and `example.com` are the same site for crawling
/// purposes; `blog.example.com` is not. Used both to decide whether a
/// page's own links are expanded and whether a redirect is followed.
pub fn is_similar_host(a: &str, b: &str) -> bool {
    bare_host(a) == bare_host(b)
}

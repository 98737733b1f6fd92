use url::{ParseError, Url};

/// Returns true for the schemes the crawler is able to check.
fn allowed_scheme(scheme: &str) -> bool {
    matches!(scheme, "http" | "https")
}

/// Resolves a raw `href` string against the page it was found on.
///
/// An absolute href (one that carries its own scheme and authority) passes
/// through as-is, provided its scheme is http or https; anything else
/// (`ftp:`, `mailto:`, `javascript:`, data URIs, ...) yields `None` and is
/// dropped silently. A relative reference is resolved against `page_url`
/// with standard RFC 3986 reference resolution: a root-relative path
/// replaces the page's path, a bare segment replaces the last path segment,
/// and query/fragment-only references keep the page's path.
///
/// Whether a reference is relative is decided by the absence of a scheme,
/// never by a placeholder host.
///
/// `drop_fragment` clears any fragment on the resolved URL.
pub fn resolve_href(href: &str, page_url: &Url, drop_fragment: bool) -> Option<Url> {
    let mut resolved = match Url::parse(href) {
        Ok(absolute) => {
            if !allowed_scheme(absolute.scheme()) {
                return None;
            }
            absolute
        }
        // No scheme: a relative reference against the page.
        Err(ParseError::RelativeUrlWithoutBase) => match page_url.join(href) {
            Ok(joined) => joined,
            Err(_) => return None,
        },
        Err(_) => return None,
    };

    if drop_fragment {
        resolved.set_fragment(None);
    }

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn absolute_http_urls_pass_through() {
        let base = page("http://example.com/");
        let resolved = resolve_href("http://example.com/path", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/path");

        let resolved = resolve_href("https://other.org/elsewhere", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "https://other.org/elsewhere");
    }

    #[test]
    fn unsupported_schemes_are_dropped() {
        let base = page("http://example.com/");
        assert!(resolve_href("ftp://example.com/file", &base, false).is_none());
        assert!(resolve_href("mailto:someone@example.com", &base, false).is_none());
        assert!(resolve_href("javascript:void(0)", &base, false).is_none());
        assert!(resolve_href("data:text/plain,hello", &base, false).is_none());
    }

    #[test]
    fn root_relative_path_replaces_page_path() {
        let base = page("http://example.com/blog/post");
        let resolved = resolve_href("/about", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/about");
        assert_eq!(resolved.host_str(), base.host_str());
    }

    #[test]
    fn bare_segment_replaces_last_path_segment() {
        let base = page("http://example.com/blog/post");
        let resolved = resolve_href("sibling", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/blog/sibling");
    }

    #[test]
    fn query_only_reference_keeps_page_path() {
        let base = page("http://example.com/list?page=1");
        let resolved = resolve_href("?page=2", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/list?page=2");
    }

    #[test]
    fn fragment_only_reference_keeps_page_path_and_query() {
        let base = page("http://example.com/list?page=1");
        let resolved = resolve_href("#results", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/list?page=1#results");
    }

    #[test]
    fn protocol_relative_reference_takes_page_scheme() {
        let base = page("https://example.com/");
        let resolved = resolve_href("//other.org/x", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "https://other.org/x");
    }

    #[test]
    fn drop_fragment_strips_relative_fragments() {
        let base = page("http://example.com/");
        let resolved = resolve_href("/path#section", &base, true).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/path");
    }

    #[test]
    fn drop_fragment_strips_absolute_fragments() {
        let base = page("http://example.com/");
        let resolved = resolve_href("http://example.com/path#section", &base, true).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/path");
    }

    #[test]
    fn fragments_are_kept_by_default() {
        let base = page("http://example.com/");
        let resolved = resolve_href("/path#section", &base, false).unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/path#section");
    }
}

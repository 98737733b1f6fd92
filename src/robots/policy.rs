//! Robots.txt rule evaluation
//!
//! Evaluation works on the raw robots.txt text using the robotstxt crate.
//! The text is re-parsed on every query; parsing is cheap next to the
//! network round-trips the answers gate.

use robotstxt::DefaultMatcher;
use url::Url;

/// Synthesized rules that disallow every path for every agent.
pub const DISALLOW_ALL: &str = "User-agent: *\nDisallow: /";

/// Checks whether `url` is allowed for `user_agent` under `robots_txt`.
///
/// Directive groups matching the agent token take precedence over `*`
/// groups. Empty rules allow everything.
pub fn path_allowed(robots_txt: &str, user_agent: &str, url: &Url) -> bool {
    if robots_txt.trim().is_empty() {
        return true;
    }

    let mut matcher = DefaultMatcher::default();
    matcher.one_agent_allowed_by_robots(robots_txt, user_agent, url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(u: &str) -> Url {
        Url::parse(u).unwrap()
    }

    #[test]
    fn empty_rules_allow_everything() {
        assert!(path_allowed("", "TestBot", &url("http://example.com/")));
        assert!(path_allowed("  \n", "TestBot", &url("http://example.com/admin")));
    }

    #[test]
    fn disallow_all_blocks_every_path() {
        assert!(!path_allowed(DISALLOW_ALL, "TestBot", &url("http://example.com/")));
        assert!(!path_allowed(DISALLOW_ALL, "TestBot", &url("http://example.com/page")));
    }

    #[test]
    fn disallow_specific_prefix() {
        let rules = "User-agent: *\nDisallow: /admin";
        assert!(path_allowed(rules, "TestBot", &url("http://example.com/")));
        assert!(path_allowed(rules, "TestBot", &url("http://example.com/page")));
        assert!(!path_allowed(rules, "TestBot", &url("http://example.com/admin")));
        assert!(!path_allowed(rules, "TestBot", &url("http://example.com/admin/users")));
    }

    #[test]
    fn allow_overrides_within_disallowed_prefix() {
        let rules = "User-agent: *\nDisallow: /private\nAllow: /private/public";
        assert!(!path_allowed(rules, "TestBot", &url("http://example.com/private")));
        assert!(path_allowed(
            rules,
            "TestBot",
            &url("http://example.com/private/public")
        ));
    }

    #[test]
    fn agent_specific_group_takes_precedence() {
        let rules = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /";
        assert!(path_allowed(rules, "GoodBot", &url("http://example.com/page")));
        assert!(!path_allowed(rules, "BadBot", &url("http://example.com/page")));
    }

    #[test]
    fn query_is_part_of_the_matched_path() {
        let rules = "User-agent: *\nDisallow: /search?";
        assert!(path_allowed(rules, "TestBot", &url("http://example.com/search")));
        assert!(!path_allowed(
            rules,
            "TestBot",
            &url("http://example.com/search?q=x")
        ));
    }
}

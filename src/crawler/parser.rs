//! HTML link extraction

use scraper::{Html, Selector};

/// Returns the raw `href` attribute of every anchor tag in `html`.
///
/// Values come back untouched; resolving them against the page URL is the
/// caller's job. Blank hrefs are skipped. Parsing is lenient and never
/// fails on malformed markup.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let mut hrefs = Vec::new();
    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if !href.trim().is_empty() {
                    hrefs.push(href.to_string());
                }
            }
        }
    }
    hrefs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_anchor_hrefs_in_document_order() {
        let html = r##"<html><body>
            <a href="/first">one</a>
            <p><a href="http://example.com/second">two</a></p>
            <a href="#third">three</a>
        </body></html>"##;
        assert_eq!(
            extract_hrefs(html),
            vec!["/first", "http://example.com/second", "#third"]
        );
    }

    #[test]
    fn skips_anchors_without_href_and_blank_hrefs() {
        let html = r#"<a name="here">no href</a><a href="   ">blank</a><a href="/ok">ok</a>"#;
        assert_eq!(extract_hrefs(html), vec!["/ok"]);
    }

    #[test]
    fn ignores_non_anchor_urls() {
        let html = r#"<img src="/image.png"><link rel="stylesheet" href="/style.css"><script src="/app.js"></script>"#;
        assert!(extract_hrefs(html).is_empty());
    }

    #[test]
    fn tolerates_malformed_markup() {
        let html = "<html><body><a href='/broken'>unclosed";
        assert_eq!(extract_hrefs(html), vec!["/broken"]);
    }
}

// src/fetcher/html.rs
// =============================================================================
// This module extracts candidate URLs from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The extraction contract is deliberately narrow. An href is kept only if
// it is one of:
// - a fully qualified ftp/http/https URL with a host, or
// - a root-relative path ("/about"), which is resolved against the
//   origin page's scheme + host and re-validated the same way.
//
// Everything else - bare fragments, mailto:, javascript:, scheme-relative
// ("//cdn.example.com"), and non-root relative paths ("about.html") - is
// dropped. A discovery crawl wants hops to OTHER sites; being picky here
// costs little and keeps the admission side simple.
//
// Rust concepts:
// - Iterators over DOM selections
// - Option<T> for hrefs that don't yield a usable URL
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts all crawlable URLs from a page body
//
// Parameters:
//   origin: the URL the body was fetched from (for resolving "/paths")
//   body: the HTML content
//
// Returns: Vec of absolute URL strings in normalized form
//
// Example:
//   origin = "http://example.com/index"
//   body   = `<a href="http://sub.example.org/p"></a> <a href="/about"></a>`
//   result = ["http://sub.example.org/p", "http://example.com/about"]
pub fn extract_links(origin: &str, body: &str) -> Vec<String> {
    let mut links = Vec::new();

    let document = Html::parse_document(body);

    // Our selector is a constant and known to be valid, so unwrap() here
    // can only trip on a programmer error
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the origin once; if IT doesn't parse we can still keep any
    // fully qualified hrefs, just not resolve relative ones
    let origin_url = Url::parse(origin).ok();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = validate_href(origin_url.as_ref(), href) {
                links.push(absolute);
            }
        }
    }

    links
}

// Turns one raw href into an accepted absolute URL, or None
fn validate_href(origin: Option<&Url>, href: &str) -> Option<String> {
    // Fully qualified URL with a crawlable scheme?
    if let Ok(parsed) = Url::parse(href) {
        if is_crawlable(&parsed) {
            return Some(parsed.to_string());
        }
        // Parsed but wrong scheme (mailto:, javascript:, data:, ...)
        return None;
    }

    // Root-relative path: rebuild it on the origin's scheme + host,
    // then re-validate the result like any other URL
    if href.starts_with('/') && !href.starts_with("//") {
        let origin = origin?;
        let host = origin.host_str()?;
        let candidate = match origin.port() {
            Some(port) => format!("{}://{}:{}{}", origin.scheme(), host, port, href),
            None => format!("{}://{}{}", origin.scheme(), host, href),
        };
        if let Ok(parsed) = Url::parse(&candidate) {
            if is_crawlable(&parsed) {
                return Some(parsed.to_string());
            }
        }
    }

    None
}

// A URL we are willing to hand to the crawl: ftp/http/https and an
// actual host to discover
fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "ftp" | "http" | "https") && url.host_str().is_some()
}

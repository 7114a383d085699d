// src/crawl/blacklist.rs
// =============================================================================
// This module holds the compiled-in blacklist.
//
// Some sites are so big (or so off-limits) that crawling into them would
// drown the run in a single network neighborhood: search engines, social
// networks, wiki farms, blog platforms, government sites. We skip them by
// plain substring matching on the whole URL - no parsing, no anchoring.
//
// Rust concepts:
// - Const arrays: Compile-time data baked into the binary
// - Iterators: any() short-circuits on the first match
// =============================================================================

// The blocked substrings. A URL containing ANY of these anywhere is
// rejected outright, before any counters are consulted.
//
// Note the deliberately loose entries: ".google." catches every country
// TLD Google runs, "blogspot." catches blogspot.com, blogspot.de, etc.
const BLACKLIST: &[&str] = &[
    "google.com",
    ".google.",
    "facebook.com",
    "twitter.com",
    ".gov",
    "youtube.com",
    "wikipedia.org",
    "wikisource.org",
    "wikibooks.org",
    "wiktionary.org",
    "wikiquote.org",
    "wikiversity.org",
    "wikia.com",
    "deviantart.com",
    "blogspot.",
    "wordpress.com",
    "tumblr.com",
    "about.com",
];

// Checks whether a URL hits the blacklist
//
// Parameters:
//   url: the full URL string (not just the host)
//
// Returns: true if any blacklist entry occurs anywhere in the URL
pub fn is_blacklisted(url: &str) -> bool {
    BLACKLIST.iter().any(|entry| url.contains(entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_is_caught_by_substring() {
        // The match is on the raw string, so any subdomain of a blocked
        // site is rejected too
        assert!(is_blacklisted("http://maps.google.com/x"));
    }

    #[test]
    fn test_country_tld_variants() {
        assert!(is_blacklisted("https://www.google.de/search"));
        assert!(is_blacklisted("https://something.blogspot.de/post"));
    }

    #[test]
    fn test_gov_suffix() {
        assert!(is_blacklisted("https://www.nasa.gov/news"));
    }

    #[test]
    fn test_ordinary_host_passes() {
        assert!(!is_blacklisted("http://example.com/about"));
    }
}

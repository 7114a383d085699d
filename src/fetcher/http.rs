// src/fetcher/http.rs
// =============================================================================
// This module fetches pages over HTTP and turns them into link lists.
//
// Fetching is two-phase:
// 1. A HEAD probe: cheap capability check. We only continue if the server
//    answers 200 and the declared Content-Type (if any) includes
//    "text/html". A missing Content-Type header is treated as permissive.
// 2. The actual GET, with the body read capped at 1 MiB. Anything past
//    the cap is simply cut off - for link discovery a truncated page
//    still yields plenty of anchors.
//
// Every kind of failure (connect error, timeout, bad status, wrong
// content type) surfaces as an Err from fetch_and_extract; the worker
// translates that into an empty result. Nothing here is ever fatal for
// the crawl as a whole.
//
// Rust concepts:
// - async/await: Network I/O without blocking worker threads
// - bail!: Early error return from anyhow
// - Streaming reads: response.chunk() to enforce the byte cap
// =============================================================================

use anyhow::{bail, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::html::extract_links;

// Hard cap on how much of any body we read
pub const BODY_LIMIT: usize = 1024 * 1024;

// Sent on every request so our traffic is identifiable in server logs
pub const USER_AGENT: &str = concat!("domain-scout/", env!("CARGO_PKG_VERSION"));

// Builds the HTTP client shared by all workers
//
// Settings mirror what a polite discovery crawler wants:
// - 10s overall timeout and 10s connect timeout per request
// - at most 5 redirects followed
// - no idle connection pooling (we rarely hit the same host twice)
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(5))
        .pool_max_idle_per_host(0)
        .build()?;
    Ok(client)
}

// Fetches one URL and extracts its links
//
// Parameters:
//   client: the shared HTTP client
//   url: the absolute URL to fetch
//
// Returns: the extracted links on success, or the first error hit
// anywhere in probe/fetch/decode
pub async fn fetch_and_extract(client: &Client, url: &str) -> Result<Vec<String>> {
    let body = fetch_html(client, url).await?;
    Ok(extract_links(url, &body))
}

// The two-phase fetch itself
async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    // Phase 1: HEAD probe
    let probe = client.head(url).send().await?;
    if probe.status() != StatusCode::OK {
        bail!("HTTP response {}", probe.status().as_u16());
    }
    if let Some(content_type) = probe.headers().get(CONTENT_TYPE) {
        let value = content_type.to_str().unwrap_or("");
        if !declares_html(value) {
            bail!("URL is not 'text/html'");
        }
    }

    // Phase 2: GET, reading at most BODY_LIMIT bytes
    let mut response = client.get(url).send().await?;
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = BODY_LIMIT - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            break;
        }
        body.extend_from_slice(&chunk);
    }

    // Real-world pages lie about encodings all the time; lossy decoding
    // still preserves every ASCII href
    Ok(String::from_utf8_lossy(&body).into_owned())
}

// Checks whether a Content-Type header value declares HTML
//
// The value can carry parameters ("text/html; charset=utf-8"), so we
// compare each ;-separated segment on its own
fn declares_html(value: &str) -> bool {
    value
        .split(';')
        .any(|segment| segment.trim().eq_ignore_ascii_case("text/html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_html_content_type() {
        assert!(declares_html("text/html"));
    }

    #[test]
    fn test_html_with_charset_parameter() {
        assert!(declares_html("text/html; charset=utf-8"));
        assert!(declares_html("text/html;charset=ISO-8859-1"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(declares_html("Text/HTML; charset=utf-8"));
    }

    #[test]
    fn test_non_html_types_rejected() {
        assert!(!declares_html("application/json"));
        assert!(!declares_html("text/plain"));
        assert!(!declares_html("image/png"));
        // Close but not equal
        assert!(!declares_html("text/html5"));
    }
}

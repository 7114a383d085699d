// src/fetcher/mod.rs
// =============================================================================
// This module is the network boundary of the crawler.
//
// Submodules:
// - http: HEAD-probe + size-capped GET fetching
// - html: anchor extraction and URL validation
//
// The rest of the program only ever calls two things: build_client() once
// at startup, and fetch_and_extract() once per dispatched URL. How pages
// are fetched and parsed is an implementation detail kept behind this
// module root.
// =============================================================================

mod html;
mod http;

// Re-export the public API so callers write fetcher::fetch_and_extract()
// instead of reaching into submodules
pub use html::extract_links;
pub use http::{build_client, fetch_and_extract};

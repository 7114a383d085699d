// src/crawl/worker.rs
// =============================================================================
// This module implements the fetch workers.
//
// Each worker is a long-lived tokio task running one simple loop:
// take a URL from the shared dispatch channel, fetch it, extract its
// links, send the result back. Workers hold NO crawl state - no frontier,
// no counters, no file handle. Their only possessions are a clone of the
// HTTP client and the two channel endpoints, which is what makes the
// orchestrator's single-writer design race-free by construction.
//
// Failures are encoded, not raised: a fetch that goes wrong for any
// reason (network error, bad status, wrong content type) produces a
// FetchResult with an empty origin and no links. The orchestrator treats
// that as "this URL contributed nothing" and moves on.
//
// There is no shutdown protocol. Workers live until the process exits;
// the crawl ends by the orchestrator returning, never by tearing down
// the pool.
//
// Rust concepts:
// - Arc<Mutex<Receiver>>: Several tasks sharing one receiving end
// - Scoped lock: Holding the lock only while waiting for the next URL
// =============================================================================

use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::fetcher;

// The dispatch channel's receiving end, shared by every worker
pub type SharedWorkQueue = Arc<Mutex<mpsc::Receiver<String>>>;

// What a worker reports back for one dispatched URL
//
// An empty origin means the fetch failed; the links are empty then too.
// On success, origin echoes the URL that was fetched so the orchestrator
// knows which host just proved reachable.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub origin: String,
    pub links: Vec<String>,
}

impl FetchResult {
    // The result a failed fetch reports
    pub fn failed() -> Self {
        Self {
            origin: String::new(),
            links: Vec::new(),
        }
    }
}

// One worker's life: loop forever over the dispatch channel
//
// Parameters:
//   work: shared receiving end of the dispatch channel
//   results: sending end of the result channel
//   client: the shared HTTP client
//   verbose: whether to print each URL as it is fetched
pub async fn worker(
    work: SharedWorkQueue,
    results: mpsc::Sender<FetchResult>,
    client: Client,
    verbose: bool,
) {
    loop {
        // Take the lock only long enough to receive one URL, then let
        // the next idle worker have it
        let url = {
            let mut receiver = work.lock().await;
            match receiver.recv().await {
                Some(url) => url,
                None => break, // dispatch channel closed: orchestrator is gone
            }
        };

        if verbose {
            println!("  Fetching: {}", url);
        }

        let result = match fetcher::fetch_and_extract(&client, &url).await {
            Ok(links) => FetchResult { origin: url, links },
            Err(_) => FetchResult::failed(),
        };

        if results.send(result).await.is_err() {
            break; // result channel closed: orchestrator is gone
        }
    }
}

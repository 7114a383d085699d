// src/crawl/orchestrator.rs
// =============================================================================
// This module is the crawl's control loop.
//
// The orchestrator is the ONLY task that touches shared crawl state:
// the frontier, the admission policy, the host store and the output file
// all live inside it and are never handed to anyone else. Workers talk to
// it exclusively through two bounded channels. That single-writer design
// is what lets the whole crawl run without a single lock around its
// state.
//
// Life of a crawl:
// - SEEDING: dispatch exactly one URL. On a fresh run that is the seed
//   URL itself. When the seed's host already appears in the output file
//   we are resuming: the frontier is re-seeded with the most recently
//   discovered hosts instead, so the crawl pushes outward from known
//   territory rather than re-treading the seed.
// - RUNNING: receive one result, absorb it (record a new host, run every
//   extracted link through admission), then refill idle workers from the
//   frontier and rotate the visited-set epoch if it hit its ceiling.
// - DRAINED: the frontier is empty and nothing is in flight, so no new
//   URL can ever appear. That is fatal: the run reports it and ends.
//   A later invocation resumes from the output file.
//
// Per-URL failures never reach this file as errors - workers encode them
// as empty results. The only errors that escape run() are structural:
// a drained frontier or an output-file write failure.
//
// Rust concepts:
// - mpsc channels: Bounded single-consumer message passing
// - Ownership: CrawlState owns every mutable structure; no Arc, no locks
// =============================================================================

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use url::Url;

use super::frontier::Frontier;
use super::policy::AdmissionPolicy;
use super::worker::{worker, FetchResult, SharedWorkQueue};
use super::{MAX_QUEUED_URLS, MAX_VISITED_URLS};
use crate::fetcher;
use crate::store::HostStore;

// Everything the crawl needs to know at launch
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: String,
    pub workers: usize,
    pub max_per_host: usize,
    pub max_subdomains: usize,
    pub verbose: bool,
    pub json: bool,
}

// One discovery, as printed in --json mode
#[derive(Serialize)]
struct Discovery<'a> {
    index: usize,
    host: &'a str,
}

// The mutable crawl state, owned exclusively by the control loop
struct CrawlState {
    policy: AdmissionPolicy,
    frontier: Frontier,
    store: HostStore,
    json: bool,
}

impl CrawlState {
    // Folds one fetch result into the crawl state
    //
    // A successful fetch proves its host reachable: record it (append +
    // flush + report) if it is new. Then every extracted link runs the
    // admission gauntlet; the ones that pass are already in the frontier
    // when this returns.
    //
    // A failed fetch (empty origin) changes nothing at all.
    fn absorb(&mut self, result: &FetchResult) -> Result<()> {
        if result.origin.is_empty() {
            return Ok(());
        }

        if let Ok(parsed) = Url::parse(&result.origin) {
            if let Some(host) = parsed.host_str() {
                if self.store.record(host)? {
                    self.report_discovery(host)?;
                }
            }
        }

        for link in &result.links {
            self.policy.admit(link, &mut self.frontier);
        }

        Ok(())
    }

    // Prints one newly discovered host to stdout
    fn report_discovery(&self, host: &str) -> Result<()> {
        if self.json {
            let line = serde_json::to_string(&Discovery {
                index: self.store.len(),
                host,
            })?;
            println!("{}", line);
        } else {
            println!("[{}] {}", self.store.len(), host);
        }
        Ok(())
    }
}

// Runs the crawl to its (fatal) end
//
// Parameters:
//   config: launch parameters from the CLI
//   store: the host store, already loaded from a previous run's output
//
// Returns: always an Err in practice - a crawl has no successful ending,
// only a drained frontier or a structural I/O failure
pub async fn run(config: CrawlConfig, store: HostStore) -> Result<()> {
    let seed = Url::parse(&config.seed)
        .with_context(|| format!("invalid seed URL '{}'", config.seed))?;
    let seed_host = seed.host_str().unwrap_or_default().to_string();

    let client = fetcher::build_client()?;

    // Dispatch channel: orchestrator -> workers. Capacity = pool size is
    // enough because we never have more than `workers` URLs in flight.
    let (work_tx, work_rx) = mpsc::channel::<String>(config.workers);
    let work_rx: SharedWorkQueue = Arc::new(Mutex::new(work_rx));

    // Result channel: workers -> orchestrator
    let (result_tx, mut result_rx) = mpsc::channel::<FetchResult>(config.workers);

    for _ in 0..config.workers {
        tokio::spawn(worker(
            Arc::clone(&work_rx),
            result_tx.clone(),
            client.clone(),
            config.verbose,
        ));
    }
    // Only workers may hold result senders from here on; if they all die,
    // recv() returns None instead of hanging forever
    drop(result_tx);

    let mut state = CrawlState {
        policy: AdmissionPolicy::new(
            config.max_per_host,
            config.max_subdomains,
            MAX_VISITED_URLS,
        ),
        frontier: Frontier::new(MAX_QUEUED_URLS),
        store,
        json: config.json,
    };

    // Warm the per-domain counters from everything a previous run saved
    for host in state.store.all() {
        state.policy.absorb_resumed_host(host);
    }

    // --- SEEDING ---------------------------------------------------------
    // Exactly one URL goes out; the loop below keeps the pool full from
    // then on.
    let mut in_flight: usize = 0;

    if state.store.contains(&seed_host) {
        // Resuming: crawl onward from the freshest known hosts instead
        // of re-treading the seed
        if !config.json {
            println!("🔄 Seed host found in saved output - resuming");
            println!(
                "   Re-seeding from the last {} discovered host(s):",
                config.workers.min(state.store.len())
            );
        }
        let recent: Vec<String> = state
            .store
            .recent(config.workers)
            .iter()
            .map(|host| format!("http://{}/", host))
            .collect();
        for url in recent {
            if !config.json {
                println!("   + {}", url);
            }
            state.frontier.enqueue(url);
        }
        if let Some(url) = state.frontier.dequeue() {
            work_tx.send(url).await.context("worker pool is gone")?;
            in_flight = 1;
        }
    } else {
        work_tx
            .send(config.seed.clone())
            .await
            .context("worker pool is gone")?;
        in_flight = 1;
    }

    // --- RUNNING ---------------------------------------------------------
    while let Some(result) = result_rx.recv().await {
        in_flight -= 1;

        state.absorb(&result)?;

        // DRAINED: nothing queued and nothing in flight means nothing
        // can ever arrive again
        if state.frontier.is_empty() && in_flight == 0 {
            return Err(anyhow!("ran out of queued URLs"));
        }

        // Refill every idle worker
        while in_flight < config.workers {
            match state.frontier.dequeue() {
                Some(url) => {
                    work_tx.send(url).await.context("worker pool is gone")?;
                    in_flight += 1;
                }
                None => break,
            }
        }

        // Bounded memory: the visited set resets wholesale at its ceiling
        if state.policy.rotate_epoch_if_full() && config.verbose {
            println!("  Visited-set ceiling reached, starting a fresh epoch");
        }
    }

    // recv() returned None: every worker task died. Should not happen in
    // a healthy process, but don't spin forever if it does.
    Err(anyhow!("all workers stopped unexpectedly"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(max_per_host: usize, max_subdomains: usize, dir: &tempfile::TempDir) -> CrawlState {
        let path = dir.path().join("hosts.txt");
        CrawlState {
            policy: AdmissionPolicy::new(max_per_host, max_subdomains, MAX_VISITED_URLS),
            frontier: Frontier::new(MAX_QUEUED_URLS),
            store: HostStore::open(&path).unwrap(),
            json: false,
        }
    }

    #[test]
    fn test_successful_result_records_host_and_admits_links() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(5, 10, &dir);

        // What a worker would report after fetching the seed page
        let body = r#"
            <a href="http://sub.example.org/p">elsewhere</a>
            <a href="/about">about</a>
        "#;
        let links = fetcher::extract_links("http://example.com/", body);
        let result = FetchResult {
            origin: "http://example.com/".to_string(),
            links,
        };

        state.absorb(&result).unwrap();

        assert!(state.store.contains("example.com"));
        // Both extracted links passed admission: one frontier entry each
        assert_eq!(state.frontier.len(), 2);
        assert_eq!(
            state.frontier.dequeue(),
            Some("http://sub.example.org/p".to_string())
        );
        assert_eq!(
            state.frontier.dequeue(),
            Some("http://example.com/about".to_string())
        );
    }

    #[test]
    fn test_re_extracting_same_links_adds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(5, 10, &dir);

        let body = r#"<a href="http://sub.example.org/p">x</a> <a href="/about">y</a>"#;
        let first = FetchResult {
            origin: "http://example.com/".to_string(),
            links: fetcher::extract_links("http://example.com/", body),
        };
        state.absorb(&first).unwrap();
        let admitted = state.frontier.len();
        assert_eq!(admitted, 2);

        // A different page serving the same hrefs contributes zero
        // new frontier entries
        let second = FetchResult {
            origin: "http://example.com/other".to_string(),
            links: fetcher::extract_links("http://example.com/other", body),
        };
        state.absorb(&second).unwrap();
        assert_eq!(state.frontier.len(), admitted);
    }

    #[test]
    fn test_failed_result_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(5, 10, &dir);

        state.absorb(&FetchResult::failed()).unwrap();

        assert_eq!(state.store.len(), 0);
        assert!(state.frontier.is_empty());
    }

    #[test]
    fn test_rediscovered_host_is_not_recorded_twice() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(5, 10, &dir);

        for path in ["a", "b", "c"] {
            let result = FetchResult {
                origin: format!("http://example.com/{}", path),
                links: Vec::new(),
            };
            state.absorb(&result).unwrap();
        }

        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.all(), ["example.com"]);
    }

    #[test]
    fn test_resume_warms_domain_counters_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.txt");
        {
            let mut store = HostStore::open(&path).unwrap();
            store.record("a.com").unwrap();
            store.record("b.a.com").unwrap();
            store.record("c.com").unwrap();
        }

        let store = HostStore::open(&path).unwrap();
        let mut policy = AdmissionPolicy::new(100, 3, MAX_VISITED_URLS);
        for host in store.all() {
            policy.absorb_resumed_host(host);
        }

        // a.com and b.a.com share the registered domain a.com (count 2),
        // c.com stands alone (count 1). One admission slot is left under
        // a.com, then the cap bites.
        let mut frontier = Frontier::new(16);
        assert!(policy.admit("http://x.a.com/", &mut frontier));
        assert!(!policy.admit("http://y.a.com/", &mut frontier));
        assert!(policy.admit("http://x.c.com/", &mut frontier));
    }
}

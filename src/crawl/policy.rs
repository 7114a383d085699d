// src/crawl/policy.rs
// =============================================================================
// This module implements the admission policy: the gate every discovered
// link must pass before it is allowed into the frontier.
//
// The policy owns all the throttling state:
// - visited:       URLs already admitted this epoch (dedup)
// - host_counts:   how many URLs we admitted per hostname
// - domain_counts: how many admissions per registered domain
//
// A link is admitted only if it parses, is not blacklisted, stays under
// both caps, was not seen before, and the frontier has room. On admission
// the policy updates all of its counters and enqueues the URL itself, so
// "admitted" always means "exactly one new frontier entry".
//
// The visited set is bounded: when it reaches its ceiling it is reset
// wholesale (a fresh "epoch"). That trades strict never-revisit semantics
// for bounded memory on runs that go on for days.
//
// Rust concepts:
// - HashMap/HashSet: Counter and dedup structures with O(1) lookup
// - Entry API: entry(..).or_insert(0) for counter updates
// - Early returns: Each rejection check exits the function immediately
// =============================================================================

use std::collections::{HashMap, HashSet};
use url::Url;

use super::blacklist::is_blacklisted;
use super::domains::registered_domain;
use super::frontier::Frontier;

// Admission state for one crawl run
#[derive(Debug)]
pub struct AdmissionPolicy {
    // URLs admitted in the current epoch (fragment-stripped form)
    visited: HashSet<String>,
    // hostname -> number of URLs admitted for that host
    host_counts: HashMap<String, usize>,
    // registered domain -> number of admissions under it
    domain_counts: HashMap<String, usize>,
    max_per_host: usize,
    max_subdomains: usize,
    // When visited reaches this many entries, it is cleared wholesale
    visited_ceiling: usize,
}

impl AdmissionPolicy {
    pub fn new(max_per_host: usize, max_subdomains: usize, visited_ceiling: usize) -> Self {
        Self {
            visited: HashSet::new(),
            host_counts: HashMap::new(),
            domain_counts: HashMap::new(),
            max_per_host,
            max_subdomains,
            visited_ceiling,
        }
    }

    // Warm-starts the per-domain counter from a host loaded out of a
    // previous run's output file
    //
    // Each saved host counts as one admission against its registered
    // domain, so a resumed crawl does not restart subdomain sprawl
    // from zero
    pub fn absorb_resumed_host(&mut self, host: &str) {
        if let Some(domain) = registered_domain(host) {
            *self.domain_counts.entry(domain).or_insert(0) += 1;
        }
    }

    // Runs one candidate URL through the full admission chain
    //
    // Parameters:
    //   raw: the candidate URL as extracted from a page
    //   frontier: the frontier to enqueue into on success
    //
    // Returns: true if the URL was admitted (and enqueued), false if it
    // was rejected by any check
    //
    // On success this updates the visited set and both counters, so the
    // decision is a side-effecting one - calling admit() twice with the
    // same URL admits at most once.
    pub fn admit(&mut self, raw: &str, frontier: &mut Frontier) -> bool {
        // Two links that differ only in their #fragment point at the
        // same document, so dedup on the fragment-stripped form
        let url = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        let host = match parsed.host_str() {
            Some(host) => host.to_string(),
            None => return false,
        };

        if is_blacklisted(url) {
            return false;
        }

        // Unresolvable registered domain (IP address, bare suffix, ...)
        // means the domain cap simply does not apply
        let domain = registered_domain(&host);
        if let Some(domain) = &domain {
            if self.domain_counts.get(domain).copied().unwrap_or(0) >= self.max_subdomains {
                return false;
            }
        }

        if self.host_counts.get(&host).copied().unwrap_or(0) >= self.max_per_host {
            return false;
        }

        if self.visited.contains(url) {
            return false;
        }

        if frontier.is_full() {
            return false;
        }

        // All checks passed: commit every side effect together
        self.visited.insert(url.to_string());
        *self.host_counts.entry(host).or_insert(0) += 1;
        if let Some(domain) = domain {
            *self.domain_counts.entry(domain).or_insert(0) += 1;
        }
        frontier.enqueue(url.to_string());
        true
    }

    // Clears the visited set when it has reached its ceiling
    //
    // Returns: true if a reset happened
    //
    // The reset is all-or-nothing: after it, every URL may be admitted
    // again (counters permitting). Partial eviction would need an LRU
    // structure for little practical gain on a discovery crawl.
    pub fn rotate_epoch_if_full(&mut self) -> bool {
        if self.visited.len() >= self.visited_ceiling {
            self.visited.clear();
            true
        } else {
            false
        }
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does admit() take the frontier as a parameter?
//    - "Frontier has room" is one of the admission checks, and enqueueing
//      is one of the admission side effects
//    - Passing &mut Frontier keeps check and effect in one place, so an
//      admitted URL can never be lost between the decision and the queue
//
// 2. Why String keys instead of &str?
//    - The HashMaps outlive the page the links came from
//    - Owned Strings mean the policy does not borrow from anything
//
// 3. What does .copied().unwrap_or(0) do?
//    - HashMap::get returns Option<&usize>
//    - .copied() turns Option<&usize> into Option<usize>
//    - .unwrap_or(0) says "a host we never saw has count zero"
//
// 4. Why commit all side effects together at the end?
//    - If we marked a URL visited before checking the frontier, a URL
//      rejected for a full frontier could never be admitted again
//    - Rejections must leave the policy state completely untouched
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AdmissionPolicy {
        AdmissionPolicy::new(5, 10, 8192)
    }

    #[test]
    fn test_admit_is_deterministic_for_same_state() {
        let mut rejecting = AdmissionPolicy::new(0, 10, 8192);
        let mut frontier = Frontier::new(16);
        // max_per_host = 0 rejects everything; asking twice gives the
        // same answer because rejection leaves the state untouched
        assert!(!rejecting.admit("http://x.com/a", &mut frontier));
        assert!(!rejecting.admit("http://x.com/a", &mut frontier));
        assert_eq!(frontier.len(), 0);
    }

    #[test]
    fn test_duplicate_url_is_rejected() {
        let mut policy = policy();
        let mut frontier = Frontier::new(16);
        assert!(policy.admit("http://x.com/a", &mut frontier));
        assert!(!policy.admit("http://x.com/a", &mut frontier));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_fragments_are_stripped_for_dedup() {
        let mut policy = policy();
        let mut frontier = Frontier::new(16);
        assert!(policy.admit("http://x.com/a#s1", &mut frontier));
        // Same document, different fragment: a duplicate
        assert!(!policy.admit("http://x.com/a#s2", &mut frontier));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_unparsable_url_is_rejected() {
        let mut policy = policy();
        let mut frontier = Frontier::new(16);
        assert!(!policy.admit("not a url at all", &mut frontier));
        assert!(!policy.admit("/just/a/path", &mut frontier));
    }

    #[test]
    fn test_blacklisted_url_is_rejected() {
        let mut policy = policy();
        let mut frontier = Frontier::new(16);
        // Rejected purely on the substring match, with all counters at zero
        assert!(!policy.admit("http://maps.google.com/x", &mut frontier));
        assert_eq!(frontier.len(), 0);
    }

    #[test]
    fn test_per_host_cap_is_never_exceeded() {
        let mut policy = AdmissionPolicy::new(3, 100, 8192);
        let mut frontier = Frontier::new(64);
        let mut admitted = 0;
        for i in 0..10 {
            if policy.admit(&format!("http://x.com/page{}", i), &mut frontier) {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 3);
        assert_eq!(policy.host_counts.get("x.com"), Some(&3));
    }

    #[test]
    fn test_per_domain_cap_is_never_exceeded() {
        let mut policy = AdmissionPolicy::new(100, 4, 8192);
        let mut frontier = Frontier::new(64);
        let mut admitted = 0;
        // Ten different subdomains of the same registered domain
        for i in 0..10 {
            if policy.admit(&format!("http://sub{}.x.com/", i), &mut frontier) {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 4);
        assert_eq!(policy.domain_counts.get("x.com"), Some(&4));
    }

    #[test]
    fn test_full_frontier_rejects_without_marking_visited() {
        let mut policy = policy();
        let mut frontier = Frontier::new(1);
        assert!(policy.admit("http://a.com/", &mut frontier));
        assert!(!policy.admit("http://b.com/", &mut frontier));

        // After the frontier drains, the same URL is admissible again:
        // the earlier rejection left no trace
        frontier.dequeue();
        assert!(policy.admit("http://b.com/", &mut frontier));
    }

    #[test]
    fn test_resumed_hosts_warm_the_domain_counter() {
        let mut policy = AdmissionPolicy::new(100, 3, 8192);
        policy.absorb_resumed_host("a.x.com");
        policy.absorb_resumed_host("b.x.com");
        assert_eq!(policy.domain_counts.get("x.com"), Some(&2));

        // Only one admission slot is left for x.com
        let mut frontier = Frontier::new(16);
        assert!(policy.admit("http://c.x.com/", &mut frontier));
        assert!(!policy.admit("http://d.x.com/", &mut frontier));
    }

    #[test]
    fn test_epoch_rotation_resets_and_permits_readmission() {
        let mut policy = AdmissionPolicy::new(100, 100, 2);
        let mut frontier = Frontier::new(16);
        assert!(policy.admit("http://a.com/", &mut frontier));
        assert!(!policy.rotate_epoch_if_full());
        assert!(policy.admit("http://b.com/", &mut frontier));

        // Ceiling reached: the whole set goes, not part of it
        assert!(policy.rotate_epoch_if_full());
        assert_eq!(policy.visited_len(), 0);

        // A URL visited before the reset may be admitted again
        // (its host counter still ticks up, though)
        assert!(policy.admit("http://a.com/", &mut frontier));
    }
}

// src/crawl/domains.rs
// =============================================================================
// This module resolves a hostname to its registered domain.
//
// The registered domain is the public-suffix-aware root of a hostname:
//   "a.b.example.com"    -> "example.com"
//   "a.example.co.uk"    -> "example.co.uk"   (co.uk is a public suffix!)
//
// We use the `psl` crate, which ships the Public Suffix List compiled into
// the binary, so lookups are pure in-memory string work - no network, no
// files, no failures beyond "this host has no registrable domain".
//
// Rust concepts:
// - Option<T>: For lookups that legitimately have no answer
// - Boundary functions: One tiny pure function hides the whole crate
// =============================================================================

// Resolves the registered domain of a hostname
//
// Parameters:
//   host: a bare hostname (no scheme, no path)
//
// Returns: Some(registered_domain) or None when the host has no
// registrable domain (IP addresses, bare public suffixes, garbage)
pub fn registered_domain(host: &str) -> Option<String> {
    psl::domain_str(host).map(|domain| domain.to_string())
}

// src/store.rs
// =============================================================================
// This module owns the discovered-host state and its on-disk mirror.
//
// The output file is the crawl's only persistent state: plain text, one
// hostname per line, appended to (never rewritten) and flushed after every
// single discovery. A crawl killed at any moment loses at most nothing -
// the next run reloads the file and picks up where it left off.
//
// The in-memory side keeps:
// - a HashSet for O(1) "have we recorded this host?" checks
// - a Vec preserving discovery order, so a resumed run can re-seed the
//   frontier from the most recently found hosts
//
// The set, the vec and the file lines are always in 1:1 correspondence.
//
// Rust concepts:
// - OpenOptions: Fine-grained control over how a file is opened
// - BufReader/lines(): Line-by-line reading
// - anyhow::Context: Attaching the file path to I/O errors
// =============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

// Discovered hosts: in-memory set + ordered list + append-only file
#[derive(Debug)]
pub struct HostStore {
    hosts: HashSet<String>,
    order: Vec<String>,
    file: File,
}

impl HostStore {
    // Opens (or creates) the output file and loads every hostname
    // already recorded in it
    //
    // Parameters:
    //   path: the output file path from the command line
    //
    // Returns: the loaded store, or a fatal error if the file exists but
    // cannot be opened or read - resuming against state we cannot read
    // must stop the run before any crawling happens
    pub fn open(path: &Path) -> Result<Self> {
        let mut hosts = HashSet::new();
        let mut order = Vec::new();

        if path.exists() {
            let existing = File::open(path)
                .with_context(|| format!("can't open output file '{}'", path.display()))?;
            for line in BufReader::new(existing).lines() {
                let line = line
                    .with_context(|| format!("can't read output file '{}'", path.display()))?;
                let host = line.trim();
                if host.is_empty() {
                    continue;
                }
                if hosts.insert(host.to_string()) {
                    order.push(host.to_string());
                }
            }
        }

        // Separate handle for appending; created empty on a fresh run
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("can't create output file '{}'", path.display()))?;

        Ok(Self { hosts, order, file })
    }

    // Records a newly confirmed host
    //
    // Returns: Ok(true) if the host was new (now appended to the file and
    // flushed), Ok(false) if it was already recorded - the file is not
    // touched in that case, however many times the host is rediscovered
    pub fn record(&mut self, host: &str) -> Result<bool> {
        if self.hosts.contains(host) {
            return Ok(false);
        }
        writeln!(self.file, "{}", host).context("can't append to output file")?;
        // Flush per host: durability beats batching for a crawl that can
        // only ever be stopped by killing it
        self.file.flush().context("can't flush output file")?;
        self.hosts.insert(host.to_string());
        self.order.push(host.to_string());
        Ok(true)
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    // All recorded hosts, oldest first
    pub fn all(&self) -> &[String] {
        &self.order
    }

    // The n most recently recorded hosts, oldest of those first
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.order.len().saturating_sub(n);
        &self.order[start..]
    }
}

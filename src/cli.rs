// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There are no subcommands here - domain-scout does exactly one thing -
// so the whole interface is a single flat struct. clap takes care of
// --help, --version, and of printing usage and exiting when a required
// flag is missing, all before any crawling starts.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Doc comments: /// lines become the --help text
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "domain-scout",
    version,
    about = "Discover reachable hostnames by crawling outward from a seed URL",
    long_about = "domain-scout follows hyperlinks outward from a seed URL and records every \
                  hostname it can reach, one per line, into an output file. The same file is \
                  read back at startup, so an interrupted crawl resumes where it stopped."
)]
pub struct Cli {
    /// Seed URL to start crawling from
    #[arg(short = 'u', long)]
    pub url: String,

    /// Output file where discovered hostnames are appended (one per line)
    ///
    /// If the file already exists its hosts are loaded first, and a seed
    /// whose host is among them makes the crawl resume instead of restart
    #[arg(short = 'o', long)]
    pub out: PathBuf,

    /// Number of concurrent fetch workers
    #[arg(short = 't', long, default_value_t = 8)]
    pub threads: usize,

    /// Maximum number of links to follow per hostname
    ///
    /// Keeps the crawl broad: once a host has used up its slots, further
    /// links into it are rejected
    #[arg(long, default_value_t = 5)]
    pub max_per_host: usize,

    /// Maximum number of admissions per registered domain
    ///
    /// Caps subdomain sprawl: *.blogfarm.example can only soak up this
    /// many slots in total
    #[arg(long, default_value_t = 10)]
    pub max_subdomains: usize,

    /// Print every URL as it is fetched
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit discoveries as JSON lines instead of plain text
    ///
    /// Also suppresses the banner and config echo so stdout stays
    /// machine-readable
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["domain-scout", "-u", "http://example.com", "-o", "hosts.txt"]);
        assert_eq!(cli.threads, 8);
        assert_eq!(cli.max_per_host, 5);
        assert_eq!(cli.max_subdomains, 10);
        assert!(!cli.verbose);
        assert!(!cli.json);
    }

    #[test]
    fn test_missing_required_flags_fail_parsing() {
        // No seed URL, no output file: clap refuses before any crawling
        assert!(Cli::try_parse_from(["domain-scout"]).is_err());
        assert!(Cli::try_parse_from(["domain-scout", "-u", "http://example.com"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "domain-scout",
            "--url",
            "http://example.com",
            "--out",
            "found.txt",
            "--threads",
            "4",
            "--max-per-host",
            "3",
            "--max-subdomains",
            "7",
            "--verbose",
            "--json",
        ]);
        assert_eq!(cli.url, "http://example.com");
        assert_eq!(cli.out, PathBuf::from("found.txt"));
        assert_eq!(cli.threads, 4);
        assert_eq!(cli.max_per_host, 3);
        assert_eq!(cli.max_subdomains, 7);
        assert!(cli.verbose);
        assert!(cli.json);
    }
}

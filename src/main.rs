// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Print the banner and the effective configuration
// 3. Load previously discovered hosts from the output file (resume state)
// 4. Hand everything to the crawl orchestrator
// 5. Exit with proper code (a crawl only ever ends in an error: either
//    the frontier drained or something structural broke)
//
// Rust concepts used:
// - async/await: The crawl runs many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - std::process::exit: Explicit exit codes for scripting
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier, admission policy, workers, orchestrator
mod fetcher; // src/fetcher/ - HTTP fetching and link extraction
mod store; // src/store.rs - resumable host output

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use crawl::CrawlConfig;
use store::HostStore;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Structural failure: drained frontier, unopenable output
            // file, invalid seed. Report and get out.
            eprintln!("❌ Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
//
// A crawl has no successful ending - it runs until the frontier drains
// or the process is killed - so the Ok branch here is mostly theoretical
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Zero workers would leave the loop with nothing to ever dispatch to
    let workers = cli.threads.max(1);

    // In --json mode stdout carries only discovery objects; all the
    // human-facing chrome is skipped
    if !cli.json {
        banner();
        println!("📁 Output file:    {}", cli.out.display());
        println!("🌐 Seed URL:       {}", cli.url);
        println!("🧵 Workers:        {}", workers);
        println!("🔗 Max per host:   {}", cli.max_per_host);
        println!("🌿 Max subdomains: {}", cli.max_subdomains);
        println!();
    }

    // Load resume state (creates the file on a fresh run)
    let store = HostStore::open(&cli.out)?;
    if !cli.json {
        println!("📄 Loaded {} known hostname(s)\n", store.len());
    }

    let config = CrawlConfig {
        seed: cli.url,
        workers,
        max_per_host: cli.max_per_host,
        max_subdomains: cli.max_subdomains,
        verbose: cli.verbose,
        json: cli.json,
    };

    crawl::run(config, store).await?;

    Ok(0)
}

// Prints the startup banner
fn banner() {
    println!("🕷️  domain-scout v{}", env!("CARGO_PKG_VERSION"));
    println!("    hostname discovery crawler");
    println!();
}

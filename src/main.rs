// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Build the crawl configuration (defaults < config file < flags)
// 4. Crawl, then print the result and optionally write (and open) a dashboard
// 5. Exit with proper code (0 = all good, 1 = problems found, 2 = error)
// =============================================================================

mod checker;
mod cli;
mod config;
mod crawl;
mod error;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, SiteArgs};
use config::CrawlConfig;
use crawl::Crawler;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays clean
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_sweeper=info,warn"),
            1 => EnvFilter::new("site_sweeper=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = no broken links or missing images
//   Ok(1) = at least one broken link or missing image
//   Err   = the scan could not run
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Site(args) => handle_site_scan(args).await,
    }
}

fn build_config(args: &SiteArgs) -> Result<CrawlConfig> {
    let mut config = match &args.config {
        Some(path) => CrawlConfig::load(path)?,
        None => CrawlConfig::default(),
    };

    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(max_children) = args.max_children {
        config.max_children_per_page = max_children;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }

    config.validate()?;
    Ok(config)
}

async fn handle_site_scan(args: SiteArgs) -> Result<i32> {
    let config = build_config(&args)?;
    tracing::info!(
        "🔍 Scanning website: {} (up to {} pages, depth {})",
        args.website_url,
        config.max_pages,
        config.max_depth
    );

    let crawler = Crawler::new(config)?;
    let result = crawler.crawl(&args.website_url).await?;

    report::print_result(&result, args.json)?;

    if let Some(path) = &args.dashboard {
        let written = report::write_dashboard(path, &args.website_url, &result)?;
        tracing::info!("📋 Dashboard generated: {}", written.display());

        // Best effort: a missing browser never changes the exit code
        if args.open {
            report::open_dashboard(&written);
        }
    }

    Ok(if result.has_problems() { 1 } else { 0 })
}

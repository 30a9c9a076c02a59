// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described by Rust structs
// and attributes, and clap generates the parsing, --help and --version.
//
// Every crawl setting is optional here. Anything not given on the command
// line comes from the --config file, and anything not in the file falls
// back to the built-in defaults.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-sweeper",
    version,
    about = "Crawl a website and report broken links and missing images",
    long_about = "site-sweeper walks a website from a seed URL, checks every link and image \
                  it finds, and reports the ones that do not answer with HTTP 200. \
                  The walk is bounded by a page budget, a depth limit and a per-page fan-out."
)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and check its links and images
    ///
    /// Example: site-sweeper site https://example.com --max-pages 20
    Site(SiteArgs),
}

#[derive(clap::Args, Debug)]
pub struct SiteArgs {
    /// Seed URL; only pages on the same scheme and host are crawled
    pub website_url: String,

    /// Output results in JSON format instead of a summary
    #[arg(long)]
    pub json: bool,

    /// TOML file with crawl settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write an HTML dashboard to this file
    #[arg(long, value_name = "FILE")]
    pub dashboard: Option<PathBuf>,

    /// Open the dashboard in the default browser once it is written
    #[arg(long, requires = "dashboard")]
    pub open: bool,

    /// Maximum number of pages to fetch and analyze (default: 5)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Depth below the seed at which pages stop being followed (default: 2)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// How many in-scope links per page are followed (default: 3)
    #[arg(long)]
    pub max_children: Option<usize>,

    /// Liveness checks of one page allowed in flight at once (default: 1)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

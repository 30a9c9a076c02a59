// src/report/mod.rs
// =============================================================================
// Turns a CrawlResult into something a person can read.
//
// Outputs:
// - console: a summary plus the scanned pages and the dead targets
// - JSON: the CrawlResult as-is, for scripts and CI pipelines
// - dashboard: a standalone HTML file, optionally opened in a browser
//   (see dashboard.rs)
// =============================================================================

mod dashboard;

pub use dashboard::{open_dashboard, write_dashboard};

use crate::crawl::CrawlResult;
use anyhow::Result;

// Prints the result either as a summary or as JSON
pub fn print_result(result: &CrawlResult, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
    } else {
        print_summary(result);
    }
    Ok(())
}

fn print_summary(result: &CrawlResult) {
    println!("\n📊 SCAN SUMMARY:");
    println!("{}", "=".repeat(60));
    println!("🔍 Pages Scanned: {}", result.visited_pages.len());
    println!("🔗 Total Links Found: {}", result.total_links_found);
    println!("❌ Broken Links: {}", result.broken_links.len());
    println!("🖼️  Total Images Found: {}", result.total_images_found);
    println!("❌ Missing Images: {}", result.missing_images.len());
    println!("{}", "=".repeat(60));

    println!("\n📄 Pages Scanned:");
    for (i, page) in result.visited_pages.iter().enumerate() {
        println!("  {}. {}", i + 1, page);
    }

    print_list("Broken Links", result.broken_links.iter());
    print_list("Missing Images", result.missing_images.iter());
}

fn print_list<'a>(title: &str, urls: impl ExactSizeIterator<Item = &'a String>) {
    if urls.len() == 0 {
        return;
    }
    println!("\n❌ {}:", title);
    for url in urls {
        println!("  - {}", url);
    }
}

// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - scope: which links may be walked into
// - session: per-crawl state (visited pages, budget, findings)
// - engine: the depth-first walk and the final recount
//
// Rust concepts:
// - Collections: HashSet for visited URLs, BTreeSet for sorted findings
// - Ownership: one CrawlSession per crawl, borrowed mutably by each visit
// =============================================================================

mod engine;
mod scope;
mod session;

pub use engine::Crawler;
pub use session::CrawlResult;

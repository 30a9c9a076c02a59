// src/checker/mod.rs
// =============================================================================
// This module contains the page-level building blocks of a scan.
//
// Submodules:
// - http: fetches pages and decides whether a URL is alive
// - html: extracts link targets and image sources from a page
//
// The crawler combines the two; neither knows anything about traversal.
// =============================================================================

mod html;
mod http;

pub use html::analyze;
pub use http::Fetcher;

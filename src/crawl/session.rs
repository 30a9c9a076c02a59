// src/crawl/session.rs
// =============================================================================
// The mutable state of one crawl.
//
// A fresh CrawlSession is created for every crawl and threaded through the
// whole traversal by &mut, so nothing leaks from one scan into the next.
// It owns:
// - the visited set (plus the order pages were visited in, for reports)
// - the page budget
// - the broken-link and missing-image findings
// - the phase (Idle -> Running -> Done)
//
// Rust concepts:
// - HashSet: O(1) "have we seen this page?" lookups
// - BTreeSet: deduplicated AND sorted, so reports come out the same every run
// - self-consuming methods: into_result() takes the session by value
// =============================================================================

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

// Lifecycle of a crawl: Idle until started, Running while pages are
// being visited, Done once the totals have been recounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Running,
    Done,
}

// Which list a dead target ends up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// An `<a href>` target that did not answer 200
    BrokenLink,
    /// An `<img src>` source that did not answer 200
    MissingImage,
}

/// A dead target and the page it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub url: String,
    pub found_on: String,
}

/// Counts pages fetched and analyzed against a fixed ceiling
//
// The budget is shared by the whole crawl, not per branch: a page used up
// deep in the first subtree is one fewer page for its siblings
#[derive(Debug, Clone, Copy)]
pub struct CrawlBudget {
    used: usize,
    max: usize,
}

impl CrawlBudget {
    // Creates an unused budget of `max` pages (0 means "crawl nothing")
    pub fn new(max: usize) -> Self {
        Self { used: 0, max }
    }

    // True once no more pages may be opened
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    // Charges one successfully fetched page
    pub fn consume(&mut self) {
        self.used += 1;
    }

    // Pages charged so far
    pub fn used(&self) -> usize {
        self.used
    }
}

/// What a finished crawl hands to the reporters
//
// #[derive(Serialize)] is what makes `--json` a one-liner in report/mod.rs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    /// Pages that were fetched successfully, in visit order
    pub visited_pages: Vec<String>,
    /// Every dead link target, once, sorted
    pub broken_links: BTreeSet<String>,
    /// Every dead image source, once, sorted
    pub missing_images: BTreeSet<String>,
    /// Links counted on the recount pass
    pub total_links_found: usize,
    /// Images counted on the recount pass
    pub total_images_found: usize,
}

impl CrawlResult {
    // True if anything is broken or missing (drives the exit code)
    pub fn has_problems(&self) -> bool {
        !self.broken_links.is_empty() || !self.missing_images.is_empty()
    }
}

#[derive(Debug)]
pub struct CrawlSession {
    /// Membership checks
    visited: HashSet<String>,
    /// The same pages in the order they were visited
    visit_order: Vec<String>,
    budget: CrawlBudget,
    /// Findings with provenance, duplicates included
    findings: Vec<Finding>,
    phase: CrawlPhase,
}

impl CrawlSession {
    // Creates an Idle session
    //
    // Parameters:
    //   max_pages: the page budget for this crawl
    pub fn new(max_pages: usize) -> Self {
        Self {
            visited: HashSet::new(),
            visit_order: Vec::new(),
            budget: CrawlBudget::new(max_pages),
            findings: Vec::new(),
            phase: CrawlPhase::Idle,
        }
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    // Idle -> Running
    pub fn start(&mut self) {
        self.phase = CrawlPhase::Running;
    }

    // Running -> Done
    pub fn finish(&mut self) {
        self.phase = CrawlPhase::Done;
    }

    pub fn budget(&self) -> &CrawlBudget {
        &self.budget
    }

    // The visited set, as the scope filter wants it
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    // The visited pages in visit order (for the recount and the report)
    pub fn visited_pages(&self) -> &[String] {
        &self.visit_order
    }

    // Exact string comparison: "/about" and "/about/" are different pages
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Records a successfully fetched page and charges it to the budget
    ///
    /// Returns false, changing nothing, if the page was already recorded.
    //
    // Called only after the fetch succeeded, so a page that failed to load
    // never appears in the visited set and never costs budget
    pub fn mark_visited(&mut self, url: &str) -> bool {
        // insert() returns false if the URL was already there
        if !self.visited.insert(url.to_string()) {
            return false;
        }
        self.visit_order.push(url.to_string());
        self.budget.consume();
        true
    }

    // Adds a finding
    //
    // Parameters:
    //   kind: broken link or missing image
    //   url: the dead target
    //   found_on: the page that referenced it
    pub fn record(&mut self, kind: FindingKind, url: &str, found_on: &str) {
        self.findings.push(Finding {
            kind,
            url: url.to_string(),
            found_on: found_on.to_string(),
        });
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Collapses the session into a result, dropping finding provenance
    //
    // Parameters:
    //   total_links_found / total_images_found: totals from the recount pass
    //
    // Returns: the CrawlResult; the same dead URL found on three pages
    //   appears once
    pub fn into_result(self, total_links_found: usize, total_images_found: usize) -> CrawlResult {
        let mut broken_links = BTreeSet::new();
        let mut missing_images = BTreeSet::new();

        // Set insertion does the deduplication
        for finding in self.findings {
            match finding.kind {
                FindingKind::BrokenLink => broken_links.insert(finding.url),
                FindingKind::MissingImage => missing_images.insert(finding.url),
            };
        }

        CrawlResult {
            visited_pages: self.visit_order,
            broken_links,
            missing_images,
            total_links_found,
            total_images_found,
        }
    }
}

// src/crawl/engine.rs
// =============================================================================
// This module implements the crawl itself: a bounded depth-first walk over
// one website that checks every link and image it sees.
//
// How it works:
// 1. Fetch a page. If that fails, the page is skipped silently
// 2. Record it as visited and charge it to the page budget
// 3. Check every link and every image on it; dead ones become findings
// 4. Live links that stay in scope form the page's frontier
// 5. Walk into the first few frontier links, depth first
// 6. When the walk is over, re-fetch every visited page to count totals
//
// Termination:
// - the page budget caps the number of pages fetched
// - pages at max_depth never contribute children
// - each page contributes at most max_children_per_page children
// - the visited set stops cycles
//
// The walk uses an explicit stack of (url, depth) frames instead of
// recursion. Children are pushed in reverse so the first frontier link is
// explored (with its whole subtree) before the second, exactly as a
// recursive depth-first visit would do.
// =============================================================================

use crate::checker::{analyze, Fetcher};
use crate::config::CrawlConfig;
use crate::crawl::scope::ScopeFilter;
use crate::crawl::session::{CrawlResult, CrawlSession, FindingKind};
use crate::error::ScanError;
use tracing::{debug, info, warn};
use url::Url;

// A pending page visit
//
// `depth` counts link hops from the seed: the seed itself is depth 0
#[derive(Debug, Clone)]
struct Frame {
    url: String,
    depth: usize,
}

/// Crawls websites with a fixed configuration
#[derive(Debug, Clone)]
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
}

impl Crawler {
    // Creates a crawler
    //
    // Parameters:
    //   config: limits, timeouts and identity used for every request
    //
    // Returns: Err if the config is invalid or the HTTP client can't be built
    pub fn new(config: CrawlConfig) -> Result<Self, ScanError> {
        // Reject zero timeouts / zero concurrency before anything touches the network
        config.validate()?;

        // One client for the whole crawl (connection pooling)
        let fetcher = Fetcher::new(&config.user_agent)?;
        Ok(Self { config, fetcher })
    }

    /// Crawls the site rooted at `seed_url`
    ///
    /// Only an unusable seed URL is an error. Unreachable pages, dead links
    /// and an exhausted budget all end up in (or shape) the result instead.
    //
    // Parameters:
    //   seed_url: the first page; its scheme + host + port define the scope
    //
    // Returns: the visited pages, deduplicated findings and recounted totals
    pub async fn crawl(&self, seed_url: &str) -> Result<CrawlResult, ScanError> {
        // The seed must be an absolute URL...
        let seed = Url::parse(seed_url).map_err(|e| ScanError::InvalidUrl {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;

        // ...with a host, otherwise there is no origin to stay on
        let scope = ScopeFilter::new(&seed, &self.config.skip_extensions).ok_or_else(|| {
            ScanError::InvalidUrl {
                url: seed_url.to_string(),
                reason: "URL has no host".to_string(),
            }
        })?;

        // Fresh state for every crawl: Idle -> Running
        let mut session = CrawlSession::new(self.config.max_pages);
        session.start();

        info!(
            origin = scope.origin(),
            max_pages = self.config.max_pages,
            "🚀 Starting website scan"
        );

        // The seed is the only frame to begin with
        let mut stack = vec![Frame {
            url: seed_url.to_string(),
            depth: 0,
        }];

        // Pop the most recently pushed frame: that is what makes this depth-first
        while let Some(frame) = stack.pop() {
            let children = self.visit(&mut session, &scope, &frame).await;

            // Reverse so the first child ends up on top of the stack
            stack.extend(children.into_iter().rev().map(|url| Frame {
                url,
                depth: frame.depth + 1,
            }));
        }

        // Provenance is only kept for the logs; the result drops it
        for finding in session.findings() {
            debug!(
                kind = ?finding.kind,
                url = finding.url.as_str(),
                found_on = finding.found_on.as_str(),
                "finding"
            );
        }

        // Second pass for the totals, then Running -> Done
        let (total_links, total_images) = self.recount(session.visited_pages()).await;
        session.finish();
        debug!(phase = ?session.phase(), pages_used = session.budget().used(), "walk complete");

        let result = session.into_result(total_links, total_images);
        info!(
            pages = result.visited_pages.len(),
            broken_links = result.broken_links.len(),
            missing_images = result.missing_images.len(),
            "Scan finished"
        );

        Ok(result)
    }

    // Visits one page
    //
    // Parameters:
    //   session: the crawl state, mutated in place
    //   scope: decides which live links may become children
    //   frame: the page URL and its depth
    //
    // Returns: the children to walk into, in document order, at most
    //   max_children_per_page of them (empty if the page was skipped)
    async fn visit(
        &self,
        session: &mut CrawlSession,
        scope: &ScopeFilter,
        frame: &Frame,
    ) -> Vec<String> {
        let Frame { url, depth } = frame;

        // Indentation mirrors the depth in the progress log
        let indent = "  ".repeat(*depth);

        // Out of budget: stop quietly, this is not an error
        if session.budget().is_exhausted() {
            debug!(url = url.as_str(), "page budget exhausted, not visiting");
            return Vec::new();
        }

        // A frontier may hold the same URL twice, and two branches can both
        // pick the same page before either has visited it
        if session.is_visited(url) {
            return Vec::new();
        }

        // A page that can't be fetched is skipped, not reported
        info!("{}📄 Accessing {}", indent, url);
        let html = match self.fetcher.fetch_page(url, self.config.fetch_timeout()).await {
            Ok(html) => html,
            Err(e) => {
                warn!("{}Failed to access {}: {}", indent, url, e);
                return Vec::new();
            }
        };

        // Only a successful fetch counts against the budget
        session.mark_visited(url);

        let page = analyze(&html, url);
        info!(
            "{}Found {} links and {} images on this page",
            indent,
            page.links.len(),
            page.images.len()
        );

        // Every link is checked, in or out of scope
        let link_verdicts = self
            .fetcher
            .check_many(&page.links, self.config.fetch_timeout(), self.config.concurrency)
            .await;

        // Live, in-scope, unvisited links become candidates in document order.
        // Duplicates stay in and take up a slot of the fan-out cap
        let mut frontier: Vec<String> = Vec::new();
        for (link, verdict) in page.links.iter().zip(link_verdicts) {
            if !verdict.is_reachable() {
                warn!("{}  ❌ BROKEN LINK: {}", indent, link);
                session.record(FindingKind::BrokenLink, link, url);
                continue;
            }

            if *depth < self.config.max_depth && scope.is_crawlable(link, session.visited()) {
                frontier.push(link.clone());
            }
        }

        // Images are checked too, but never crawled
        let image_verdicts = self
            .fetcher
            .check_many(&page.images, self.config.fetch_timeout(), self.config.concurrency)
            .await;

        for (image, verdict) in page.images.iter().zip(image_verdicts) {
            if !verdict.is_reachable() {
                warn!("{}  ❌ MISSING IMAGE: {}", indent, image);
                session.record(FindingKind::MissingImage, image, url);
            }
        }

        // Fan-out cap: only the first few candidates are followed
        frontier.truncate(self.config.max_children_per_page);
        for child in &frontier {
            debug!("{}🔍 Crawling deeper: {}", indent, child);
        }

        frontier
    }

    // Re-fetches every visited page and counts the links and images on it
    //
    // This repeats work the walk already did, and on pages whose content
    // changes between requests the totals can disagree with what was
    // checked. Pages that fail to load this time are left out of the totals.
    //
    // Parameters:
    //   pages: the visited pages, in visit order
    //
    // Returns: (total links, total images)
    async fn recount(&self, pages: &[String]) -> (usize, usize) {
        let mut total_links = 0;
        let mut total_images = 0;

        for page_url in pages {
            // Any status is fine here: whatever comes back gets counted
            match self
                .fetcher
                .fetch_any(page_url, self.config.recount_timeout())
                .await
            {
                Ok(html) => {
                    let page = analyze(&html, page_url);
                    total_links += page.links.len();
                    total_images += page.images.len();
                }
                Err(e) => debug!(url = page_url.as_str(), error = %e, "recount fetch failed"),
            }
        }

        (total_links, total_images)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec as a stack instead of recursion?
//    - An async fn cannot call itself without boxing the future
//    - push()/pop() on a Vec gives the same depth-first order
//    - Pushing children in reverse means the first child is popped first
//
// 2. Why pass `&mut CrawlSession` around?
//    - Only one visit runs at a time, so plain mutable borrowing is enough
//    - No Mutex, no global state, nothing shared between two crawls
//
// 3. What does zip() do here?
//    - check_many() returns one verdict per URL, in the same order
//    - zip() walks both lists together so each link meets its verdict
// -----------------------------------------------------------------------------

// src/checker/html.rs
// =============================================================================
// This module pulls link targets and image sources out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup still parses
//
// We also use the `url` crate to resolve relative references against the
// page they were found on.
//
// Nothing is filtered or deduplicated here: a `mailto:` link or the same
// image used twice both come back, in document order. Deciding what to do
// with them is the crawler's job.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

/// Everything a page points at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// Resolved `<a href>` targets
    pub links: Vec<String>,
    /// Resolved `<img src>` sources
    pub images: Vec<String>,
}

// Analyzes a page and returns its absolute link and image targets
//
// Parameters:
//   html: the page content
//   base_url: the URL the page was fetched from
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src='logo.png'>"
//   base_url = "https://example.com/en/"
//   links = ["https://example.com/docs"]
//   images = ["https://example.com/en/logo.png"]
pub fn analyze(html: &str, base_url: &str) -> PageLinks {
    // An unusable base URL means nothing on the page can be resolved
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(_) => return PageLinks::default(),
    };

    let (Ok(link_selector), Ok(image_selector)) =
        (Selector::parse("a[href]"), Selector::parse("img[src]"))
    else {
        return PageLinks::default();
    };

    let document = Html::parse_document(html);

    PageLinks {
        links: collect(&document, &link_selector, "href", &base),
        images: collect(&document, &image_selector, "src", &base),
    }
}

// Resolves the given attribute of every selected element
fn collect(document: &Html, selector: &Selector, attribute: &str, base: &Url) -> Vec<String> {
    document
        .select(selector)
        .filter_map(|element| element.value().attr(attribute))
        .filter_map(|reference| resolve_url(base, reference))
        .collect()
}

// Resolves a possibly-relative reference to an absolute URL
//
// Url::join handles both cases: absolute references replace the base
// entirely, relative ones are resolved like a browser would.
//
// Examples:
//   base = "https://example.com/page"
//   "/docs"              -> Some("https://example.com/docs")
//   "https://other.com"  -> Some("https://other.com/")
//   "#top"               -> Some("https://example.com/page#top")
//   "mailto:a@b.c"       -> Some("mailto:a@b.c")
fn resolve_url(base: &Url, reference: &str) -> Option<String> {
    base.join(reference.trim()).ok().map(|url| url.to_string())
}

// src/report/dashboard.rs
// =============================================================================
// Writes the scan result as a standalone HTML dashboard.
//
// The page has no external assets: styles are inlined so the file can be
// mailed around or archived as a CI artifact.
// =============================================================================

use crate::crawl::CrawlResult;
use crate::error::ScanError;
use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f8; color: #222; }
header { background: #1f2937; color: #fff; padding: 24px 32px; }
header p { margin: 4px 0 0; color: #cbd5e1; }
main { padding: 24px 32px; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 16px; }
.stat { background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.stat .value { font-size: 28px; font-weight: 600; }
.stat.bad .value { color: #b91c1c; }
.stat.good .value { color: #15803d; }
section { background: #fff; border-radius: 8px; padding: 16px; margin-top: 24px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.item { font-family: monospace; padding: 6px 0; border-bottom: 1px solid #eee; word-break: break-all; }
.clear { color: #15803d; }
footer { padding: 16px 32px; color: #64748b; font-size: 13px; }
"#;

// Escapes text for use inside HTML element content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn stat(label: &str, value: usize, class: &str) -> String {
    format!(
        r#"<div class="stat {}"><div class="label">{}</div><div class="value">{}</div></div>"#,
        class, label, value
    )
}

// Renders a list of URLs, or `clear_message` if there are none
fn url_section<'a>(
    title: &str,
    urls: impl ExactSizeIterator<Item = &'a String>,
    clear_message: &str,
) -> String {
    let body = if urls.len() == 0 {
        format!(r#"<p class="clear">{}</p>"#, clear_message)
    } else {
        urls.map(|url| format!(r#"<div class="item">{}</div>"#, escape(url)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("<section><h2>{}</h2>\n{}\n</section>", title, body)
}

/// Builds the dashboard HTML for a finished scan
pub fn render_dashboard(seed_url: &str, result: &CrawlResult, generated_at: DateTime<Local>) -> String {
    let broken = result.broken_links.len();
    let missing = result.missing_images.len();
    let working_links = result.total_links_found.saturating_sub(broken);
    let working_images = result.total_images_found.saturating_sub(missing);

    let health = |count: usize| if count == 0 { "good" } else { "bad" };

    let stats = [
        stat("Pages Scanned", result.visited_pages.len(), ""),
        stat("Total Links", result.total_links_found, ""),
        stat("Working Links", working_links, "good"),
        stat("Broken Links", broken, health(broken)),
        stat("Total Images", result.total_images_found, ""),
        stat("Working Images", working_images, "good"),
        stat("Missing Images", missing, health(missing)),
    ]
    .join("\n");

    let pages = url_section(
        "Pages Scanned",
        result.visited_pages.iter(),
        "No page could be fetched.",
    );
    let broken_links = url_section(
        "Broken Links",
        result.broken_links.iter(),
        "All links are working.",
    );
    let missing_images = url_section(
        "Missing Images",
        result.missing_images.iter(),
        "All images are loading.",
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Site Sweeper Report</title>
<style>{style}</style>
</head>
<body>
<header>
<h1>Website Health Report</h1>
<p>{seed}</p>
</header>
<main>
<div class="stats">
{stats}
</div>
{pages}
{broken_links}
{missing_images}
</main>
<footer>Last updated: {timestamp} | Multi-page scan completed</footer>
</body>
</html>
"#,
        style = STYLE,
        seed = escape(seed_url),
        stats = stats,
        pages = pages,
        broken_links = broken_links,
        missing_images = missing_images,
        timestamp = generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Writes the dashboard to `path` and returns its absolute location
pub fn write_dashboard(path: &Path, seed_url: &str, result: &CrawlResult) -> Result<PathBuf, ScanError> {
    let html = render_dashboard(seed_url, result, Local::now());
    std::fs::write(path, html)?;

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(absolute)
}

/// Opens a written dashboard in the default browser
///
/// Failing to launch a browser (headless CI box, no desktop session) is
/// logged and reported as `false`; the scan result is unaffected.
pub fn open_dashboard(path: &Path) -> bool {
    launch_with(path, |path| open::that(path))
}

// Runs `opener` on `path` and turns its outcome into a logged bool
//
// Parameters:
//   path: the dashboard file
//   opener: what actually launches it (open::that outside of tests)
fn launch_with(path: &Path, opener: impl FnOnce(&Path) -> io::Result<()>) -> bool {
    match opener(path) {
        Ok(()) => {
            info!("🌐 Dashboard opened in your default browser: {}", path.display());
            true
        }
        Err(e) => {
            warn!("Could not open {} in a browser: {}", path.display(), e);
            false
        }
    }
}

// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Every knob has a built-in default. A TOML file can override any subset of
// them, and command-line flags override the file (see main.rs).
//
// Example file:
//
//   max_pages = 10
//   max_depth = 2
//   user_agent = "Mozilla/5.0 (X11; Linux x86_64)"
//   skip_extensions = ["pdf", "zip"]
//
// Rust concepts:
// - #[serde(default)]: missing fields fall back to Default::default()
// - Duration: typed time spans instead of raw integers
// =============================================================================

use crate::error::ScanError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAX_PAGES: usize = 5;
pub const DEFAULT_MAX_DEPTH: usize = 2;
pub const DEFAULT_MAX_CHILDREN_PER_PAGE: usize = 3;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RECOUNT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// File types that are checked for liveness but never crawled into
pub const DEFAULT_SKIP_EXTENSIONS: [&str; 10] = [
    "pdf", "jpg", "jpeg", "png", "gif", "zip", "doc", "docx", "xls", "xlsx",
];

/// Settings for one crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Page budget: how many pages may be fetched and analyzed
    pub max_pages: usize,
    /// Pages at this depth are analyzed but never recursed from
    pub max_depth: usize,
    /// Fan-out cap: how many frontier links per page are followed
    pub max_children_per_page: usize,
    pub fetch_timeout_secs: u64,
    pub recount_timeout_secs: u64,
    pub user_agent: String,
    /// Extensions without the leading dot, compared case-insensitively
    pub skip_extensions: Vec<String>,
    /// How many liveness checks of one page may be in flight at once
    pub concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_children_per_page: DEFAULT_MAX_CHILDREN_PER_PAGE,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            recount_timeout_secs: DEFAULT_RECOUNT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            skip_extensions: DEFAULT_SKIP_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            concurrency: 1,
        }
    }
}

impl CrawlConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn recount_timeout(&self) -> Duration {
        Duration::from_secs(self.recount_timeout_secs)
    }

    /// Parses a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ScanError> {
        let config: CrawlConfig =
            toml::from_str(content).map_err(|e| ScanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScanError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.concurrency == 0 {
            return Err(ScanError::Config("concurrency must be at least 1".to_string()));
        }
        if self.fetch_timeout_secs == 0 || self.recount_timeout_secs == 0 {
            return Err(ScanError::Config("timeouts must be at least 1 second".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_children_per_page, 3);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.recount_timeout(), Duration::from_secs(5));
        assert_eq!(config.skip_extensions.len(), 10);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CrawlConfig::from_toml_str("max_pages = 12\nmax_depth = 1\n").unwrap();
        assert_eq!(config.max_pages, 12);
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_children_per_page, 3);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_invalid_toml() {
        let result = CrawlConfig::from_toml_str("max_pages = \"lots\"");
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = CrawlConfig::from_toml_str("concurrency = 0");
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CrawlConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ScanError::Config(_))));
    }
}

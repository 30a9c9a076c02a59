// src/checker/http.rs
// =============================================================================
// This module talks to the network: fetching pages and checking whether
// URLs are alive.
//
// Key functionality:
// - One shared reqwest Client with a browser-like User-Agent
// - TLS certificate validation is switched off: the sites we scan often sit
//   behind internal certificates
// - A URL is alive only when the final response is exactly 200 OK
// - Every failure is turned into a FetchError value and then into a verdict,
//   nothing is retried and nothing aborts the scan
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E> and `?`: FetchError is built from reqwest::Error via From
// - Streams: buffered() runs checks concurrently but keeps input order
// =============================================================================

use crate::error::FetchError;
use futures::stream::{self, StreamExt};
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Outcome of a liveness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The request finished in time with HTTP 200
    Reachable,
    /// Anything else: other status codes, timeouts, DNS/TLS/connection errors
    Unreachable,
}

impl Liveness {
    pub fn is_reachable(self) -> bool {
        matches!(self, Liveness::Reachable)
    }
}

// Wraps the HTTP client so the rest of the crate never sees reqwest directly
//
// Client is reference counted internally, so cloning a Fetcher is cheap
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds a fetcher that identifies itself with `user_agent`
    //
    // Parameters:
    //   user_agent: sent on every request (a desktop browser string by default)
    //
    // Returns: Err only if reqwest can't set up its TLS backend
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            // Self-signed and internal certificates are accepted
            .danger_accept_invalid_certs(true)
            // Redirects are followed; only the final status matters
            .redirect(Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    // Sends one GET request with a per-request timeout
    //
    // The `?` converts reqwest::Error into FetchError (see error.rs)
    async fn get(&self, url: &str, timeout: Duration) -> Result<Response, FetchError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        Ok(response)
    }

    /// Fetches a page body, failing on any status other than 200
    //
    // Parameters:
    //   url: the page to fetch
    //   timeout: how long the whole request may take
    //
    // Returns: the body as text, or why it couldn't be had
    pub async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.get(url, timeout).await?;

        // Strictly 200: a 204 or a 206 is not a page we crawl
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Fetches a body whatever the status code is
    //
    // Used by the recount pass, which counts whatever page comes back
    pub async fn fetch_any(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.get(url, timeout).await?;
        Ok(response.text().await?)
    }

    /// Checks a single URL for liveness
    ///
    /// The body is never read: the status line is all we need.
    //
    // Parameters:
    //   url: any URL found on a page (mailto: and friends simply fail)
    //   timeout: how long the request may take
    //
    // Returns: Reachable for a final 200, Unreachable for everything else
    pub async fn check(&self, url: &str, timeout: Duration) -> Liveness {
        // First turn every outcome into Result<(), FetchError>...
        let outcome = match self.get(url, timeout).await {
            Ok(response) if response.status() == StatusCode::OK => Ok(()),
            Ok(response) => Err(FetchError::Status(response.status().as_u16())),
            Err(e) => Err(e),
        };

        // ...then collapse it: the cause is logged and otherwise ignored
        match outcome {
            Ok(()) => Liveness::Reachable,
            Err(cause) => {
                debug!(url, %cause, "target unreachable");
                Liveness::Unreachable
            }
        }
    }

    /// Checks many URLs, returning verdicts in the same order as `urls`
    ///
    /// With `concurrency == 1` the checks run strictly one after another.
    //
    // Parameters:
    //   urls: the targets of one page, in document order
    //   timeout: per-request timeout
    //   concurrency: how many checks may be in flight at once
    //
    // Returns: one Liveness per URL, index-aligned with `urls`
    pub async fn check_many(
        &self,
        urls: &[String],
        timeout: Duration,
        concurrency: usize,
    ) -> Vec<Liveness> {
        // buffered() (not buffer_unordered()) keeps results in input order
        stream::iter(urls.iter().map(|url| self.check(url, timeout)))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered() vs buffer_unordered()
//    - Both keep up to N futures running at once
//    - buffered() yields results in the order the futures were created,
//      which is what lets the crawler pair verdicts with links
//
// 2. Why a per-request timeout?
//    - Page fetches and the final recount use different limits
//    - RequestBuilder::timeout() overrides the client-wide setting
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn fetcher() -> Fetcher {
        Fetcher::new(DEFAULT_USER_AGENT).unwrap()
    }

    async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_ok_is_reachable() {
        let server = MockServer::start().await;
        mount(&server, "/ok", ResponseTemplate::new(200)).await;

        let verdict = fetcher().check(&format!("{}/ok", server.uri()), TIMEOUT).await;
        assert_eq!(verdict, Liveness::Reachable);
    }

    #[tokio::test]
    async fn test_not_found_is_unreachable() {
        let server = MockServer::start().await;

        // wiremock answers 404 for anything that was not mounted
        let verdict = fetcher().check(&format!("{}/gone", server.uri()), TIMEOUT).await;
        assert_eq!(verdict, Liveness::Unreachable);
    }

    #[tokio::test]
    async fn test_other_success_codes_are_unreachable() {
        let server = MockServer::start().await;
        mount(&server, "/empty", ResponseTemplate::new(204)).await;

        let verdict = fetcher().check(&format!("{}/empty", server.uri()), TIMEOUT).await;
        assert_eq!(verdict, Liveness::Unreachable);
    }

    #[tokio::test]
    async fn test_redirect_to_ok_is_reachable() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/old",
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri()).as_str()),
        )
        .await;
        mount(&server, "/new", ResponseTemplate::new(200)).await;

        let verdict = fetcher().check(&format!("{}/old", server.uri()), TIMEOUT).await;
        assert_eq!(verdict, Liveness::Reachable);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/slow",
            ResponseTemplate::new(200).set_delay(Duration::from_secs(3)),
        )
        .await;

        let url = format!("{}/slow", server.uri());
        let short = Duration::from_millis(200);

        assert_eq!(fetcher().check(&url, short).await, Liveness::Unreachable);
        let result = fetcher().fetch_page(&url, short).await;
        assert!(matches!(result, Err(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn test_non_http_scheme_is_unreachable() {
        let verdict = fetcher().check("mailto:someone@example.com", TIMEOUT).await;
        assert_eq!(verdict, Liveness::Unreachable);
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        // Port 9 (discard) is essentially never listening on test machines
        let verdict = fetcher().check("http://127.0.0.1:9/", TIMEOUT).await;
        assert_eq!(verdict, Liveness::Unreachable);
    }

    #[tokio::test]
    async fn test_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ua"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let verdict = fetcher().check(&format!("{}/ua", server.uri()), TIMEOUT).await;
        assert_eq!(verdict, Liveness::Reachable);
    }

    #[tokio::test]
    async fn test_fetch_page_requires_ok() {
        let server = MockServer::start().await;
        mount(&server, "/page", ResponseTemplate::new(200).set_body_string("<p>hi</p>")).await;
        mount(&server, "/error", ResponseTemplate::new(500).set_body_string("oops")).await;

        let body = fetcher()
            .fetch_page(&format!("{}/page", server.uri()), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(body, "<p>hi</p>");

        let result = fetcher()
            .fetch_page(&format!("{}/error", server.uri()), TIMEOUT)
            .await;
        assert!(matches!(result, Err(FetchError::Status(500))));
    }

    #[tokio::test]
    async fn test_fetch_any_ignores_status() {
        let server = MockServer::start().await;
        mount(&server, "/error", ResponseTemplate::new(500).set_body_string("oops")).await;

        let body = fetcher()
            .fetch_any(&format!("{}/error", server.uri()), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(body, "oops");
    }

    #[tokio::test]
    async fn test_check_many_keeps_order() {
        let server = MockServer::start().await;
        mount(&server, "/a", ResponseTemplate::new(200).set_delay(Duration::from_millis(150))).await;
        mount(&server, "/c", ResponseTemplate::new(200)).await;

        let urls = vec![
            format!("{}/a", server.uri()),
            format!("{}/b", server.uri()),
            format!("{}/c", server.uri()),
        ];

        for concurrency in [1, 3] {
            let verdicts = fetcher().check_many(&urls, TIMEOUT, concurrency).await;
            assert_eq!(
                verdicts,
                vec![Liveness::Reachable, Liveness::Unreachable, Liveness::Reachable]
            );
        }
    }
}

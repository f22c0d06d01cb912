//! Trending legal news over HTTP.
//!
//! The backend answers `GET /trending-legal-news` with a search-result
//! object.  On success the stories are under `results`; on failure the body
//! is `{"error": "..."}` (still with a 200 status), which is reported as
//! [`FeedError::Backend`].

use std::collections::HashSet;

use anyhow::Result;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{DataSource, NewsItem};

/// Why a fetch produced no items.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend reported: {0}")]
    Backend(String),
}

/// Wire shape of the endpoint.  Fields other than these are ignored.
#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    results: Vec<NewsItem>,
    #[serde(default)]
    error: Option<String>,
}

/// A trending-legal-news endpoint.
pub struct LegalNewsSource {
    /// Full URL of the endpoint.
    pub endpoint: String,
    /// A human-readable label shown in the status bar.
    pub label: String,
}

impl LegalNewsSource {
    /// Create a new source.
    ///
    /// # Arguments
    ///
    /// * `endpoint` — full URL, e.g.
    ///   `http://localhost:8000/trending-legal-news`.
    /// * `label` — short name displayed in the TUI.
    pub fn new(endpoint: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            label: label.into(),
        }
    }

    /// Decode a response body into display-ordered items.
    ///
    /// Pure (no I/O) so tests can exercise it without the network.  Records
    /// without a url are skipped and repeated urls keep their first
    /// occurrence.
    pub fn parse_response(body: &[u8]) -> Result<Vec<NewsItem>, FeedError> {
        let response: TrendingResponse = serde_json::from_slice(body)?;
        if let Some(message) = response.error {
            return Err(FeedError::Backend(message));
        }

        let total = response.results.len();
        let mut seen = HashSet::new();
        let items: Vec<NewsItem> = response
            .results
            .into_iter()
            .filter(|item| !item.url.is_empty())
            .filter(|item| seen.insert(item.url.clone()))
            .collect();

        if items.len() != total {
            debug!(total, kept = items.len(), "dropped records without a unique url");
        }
        Ok(items)
    }
}

impl DataSource for LegalNewsSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<Vec<NewsItem>> {
        let body = reqwest::blocking::get(&self.endpoint)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(FeedError::from)?;
        let items = Self::parse_response(body.as_ref()).inspect_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "could not use news response");
        })?;
        Ok(items)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_extracts_results_in_order() {
        let body = br#"{
            "query": "latest Important legal issue news India",
            "answer": null,
            "results": [
                {
                    "url": "https://news.example/sc-bail",
                    "title": "Supreme Court on bail",
                    "content": "The bench observed...",
                    "score": 0.91
                },
                {
                    "url": "https://news.example/hc-tax",
                    "title": "High Court on tax",
                    "content": "In a ruling..."
                }
            ],
            "response_time": 1.8
        }"#;

        let items = LegalNewsSource::parse_response(body).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "https://news.example/sc-bail");
        assert_eq!(items[0].title, "Supreme Court on bail");
        assert_eq!(items[0].content, "The bench observed...");
        assert_eq!(items[1].title, "High Court on tax");
    }

    #[test]
    fn backend_error_is_reported() {
        let body = br#"{"error": "Invalid API key"}"#;
        let err = LegalNewsSource::parse_response(body).unwrap_err();

        assert!(matches!(err, FeedError::Backend(ref m) if m == "Invalid API key"));
        assert_eq!(err.to_string(), "backend reported: Invalid API key");
    }

    #[test]
    fn missing_results_is_an_empty_list() {
        let items = LegalNewsSource::parse_response(br#"{"query": "q"}"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn duplicate_urls_keep_first_occurrence() {
        let body = br#"{"results": [
            {"url": "https://news.example/a", "title": "First", "content": ""},
            {"url": "https://news.example/b", "title": "Other", "content": ""},
            {"url": "https://news.example/a", "title": "Second copy", "content": ""}
        ]}"#;

        let items = LegalNewsSource::parse_response(body).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First");
        assert_eq!(items[1].url, "https://news.example/b");
    }

    #[test]
    fn records_without_url_are_skipped() {
        let body = br#"{"results": [
            {"title": "No link", "content": "x"},
            {"url": "https://news.example/ok", "title": "Linked"}
        ]}"#;

        let items = LegalNewsSource::parse_response(body).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Linked");
        assert_eq!(items[0].content, "");
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = LegalNewsSource::parse_response(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn name_returns_label() {
        let src = LegalNewsSource::new("http://localhost:8000/trending-legal-news", "Legal");
        assert_eq!(src.name(), "Legal");
    }
}

//! Web search for the research loop.
//!
//! A [`WebSearch`] backend returns structured [`SearchResult`]s; the loop
//! only ever sees them rendered as a citation list by [`format_results`].

pub mod duckduckgo;

use async_trait::async_trait;

use crate::error::SearchError;

pub use duckduckgo::DuckDuckGoSearch;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Page title.
    pub title: String,
    /// Body snippet.
    pub snippet: String,
    /// Source URL.
    pub url: String,
}

impl SearchResult {
    /// Creates a result from its three parts.
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }

    /// Renders this hit as a single citation line: `**title**: snippet (url)`.
    #[must_use]
    pub fn to_citation(&self) -> String {
        format!("**{}**: {} ({})", self.title, self.snippet, self.url)
    }
}

/// Trait for web search backends.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Backend name (e.g., `"duckduckgo"`).
    fn name(&self) -> &'static str;

    /// Fetches up to `limit` results for `query`, in ranking order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on network or HTTP failures. Zero hits is not
    /// an error.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError>;
}

/// Joins results into the one-per-line citation list handed to the summarizer.
///
/// An empty slice yields an empty string.
#[must_use]
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(SearchResult::to_citation)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs one search and formats it, enforcing the input contract.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for a blank query,
/// [`SearchError::InvalidLimit`] for a zero limit, and propagates backend
/// failures unchanged.
pub async fn search_formatted(
    backend: &dyn WebSearch,
    query: &str,
    limit: usize,
) -> Result<String, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::InvalidQuery);
    }
    if limit == 0 {
        return Err(SearchError::InvalidLimit { limit });
    }

    let mut results = backend.search(query, limit).await?;
    results.truncate(limit);
    Ok(format_results(&results))
}

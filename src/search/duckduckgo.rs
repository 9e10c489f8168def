//! DuckDuckGo backend using the JavaScript-free HTML endpoint.
//!
//! No API key is needed. Results are scraped with regular expressions;
//! redirect links are unwrapped to their target URL.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::{SearchResult, WebSearch};
use crate::error::SearchError;

/// Default HTML search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

const USER_AGENT: &str = concat!("ldr-rs/", env!("CARGO_PKG_VERSION"));

struct Patterns {
    title: Regex,
    href: Regex,
    snippet: Regex,
    tag: Regex,
    whitespace: Regex,
}

static PATTERNS: LazyLock<Option<Patterns>> = LazyLock::new(|| {
    Some(Patterns {
        title: Regex::new(r#"(?s)<a\s([^>]*class="[^"]*result__a[^"]*"[^>]*)>(.*?)</a>"#).ok()?,
        href: Regex::new(r#"href="([^"]*)""#).ok()?,
        snippet: Regex::new(
            r#"(?s)<(a|div|td)\s[^>]*class="[^"]*result__snippet[^"]*"[^>]*>(.*?)</(?:a|div|td)>"#,
        )
        .ok()?,
        tag: Regex::new(r"<[^>]+>").ok()?,
        whitespace: Regex::new(r"\s+").ok()?,
    })
});

/// Web search through `html.duckduckgo.com`.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSearch {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    /// Creates a backend against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Request`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, SearchError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Creates a backend against a custom endpoint (a proxy or mirror).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Request`] if the HTTP client cannot be built.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, SearchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?;

        // Rate-limited clients get 202 with a challenge page instead of results.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let results = parse_results(&html, limit);
        debug!(query, hits = results.len(), "duckduckgo search complete");
        Ok(results)
    }
}

/// Extracts up to `limit` organic results from a results page.
///
/// Each title anchor starts a result; its snippet is the first snippet
/// element before the next title. Ads and results without a URL are skipped.
#[must_use]
pub fn parse_results(html: &str, limit: usize) -> Vec<SearchResult> {
    let Some(p) = PATTERNS.as_ref() else {
        return Vec::new();
    };

    let anchors: Vec<_> = p.title.captures_iter(html).collect();
    let mut results = Vec::new();

    for (i, caps) in anchors.iter().enumerate() {
        if results.len() >= limit {
            break;
        }
        let (Some(whole), Some(attrs), Some(title)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        let Some(url) = p
            .href
            .captures(attrs.as_str())
            .and_then(|c| c.get(1))
            .map(|m| unwrap_redirect(&decode_entities(m.as_str())))
            .filter(|u| !u.is_empty() && !is_ad(u))
        else {
            continue;
        };

        let region_end = anchors
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(html.len(), |m| m.start());
        let snippet = p
            .snippet
            .captures(&html[whole.end()..region_end])
            .and_then(|c| c.get(2))
            .map(|m| clean_text(p, m.as_str()))
            .unwrap_or_default();

        results.push(SearchResult {
            title: clean_text(p, title.as_str()),
            snippet,
            url,
        });
    }

    results
}

/// Strips tags, decodes entities, and collapses whitespace.
fn clean_text(p: &Patterns, fragment: &str) -> String {
    let without_tags = p.tag.replace_all(fragment, "");
    let decoded = decode_entities(&without_tags);
    p.whitespace.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Resolves `//duckduckgo.com/l/?uddg=<target>` links to `<target>`.
fn unwrap_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let Ok(url) = Url::parse(&absolute) else {
        return absolute;
    };

    let is_redirect = url
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && url.path() == "/l/";

    if is_redirect {
        if let Some((_, target)) = url.query_pairs().find(|(k, _)| k == "uddg") {
            return target.into_owned();
        }
    }
    absolute
}

fn is_ad(url: &str) -> bool {
    url.contains("duckduckgo.com/y.js")
}

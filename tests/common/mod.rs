//! Shared mocks for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ldr_rs::agent::{ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use ldr_rs::search::{SearchResult, WebSearch};
use ldr_rs::{AgentError, SearchError};

/// Completion service that answers by agent role and records every request.
///
/// Replies are taken from per-role queues keyed on the system prompt; an
/// exhausted queue answers with a canned line for that role.
pub struct MockProvider {
    summaries: Mutex<VecDeque<String>>,
    gaps: Mutex<VecDeque<String>>,
    queries: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            summaries: Mutex::new(VecDeque::new()),
            gaps: Mutex::new(VecDeque::new()),
            queries: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_summaries(self, replies: &[&str]) -> Self {
        fill(&self.summaries, replies);
        self
    }

    pub fn with_gaps(self, replies: &[&str]) -> Self {
        fill(&self.gaps, replies);
        self
    }

    pub fn with_queries(self, replies: &[&str]) -> Self {
        fill(&self.queries, replies);
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

fn fill(queue: &Mutex<VecDeque<String>>, replies: &[&str]) {
    if let Ok(mut q) = queue.lock() {
        q.extend(replies.iter().map(|r| (*r).to_string()));
    }
}

fn pop_or(queue: &Mutex<VecDeque<String>>, fallback: &str) -> String {
    queue
        .lock()
        .ok()
        .and_then(|mut q| q.pop_front())
        .unwrap_or_else(|| fallback.to_string())
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
        let system = request
            .messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let content = if system.starts_with("Summarize") {
            pop_or(&self.summaries, "- summary")
        } else if system.starts_with("Identify") {
            pop_or(&self.gaps, "- gap")
        } else {
            pop_or(&self.queries, "**Query:** follow-up query")
        };

        Ok(ChatResponse {
            content,
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }
}

/// Search backend returning a fixed result set and recording queries.
pub struct MockSearch {
    results: Vec<SearchResult>,
    queries: Mutex<Vec<String>>,
    fail: bool,
}

impl MockSearch {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            queries: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        if let Ok(mut q) = self.queries.lock() {
            q.push(query.to_string());
        }
        if self.fail {
            return Err(SearchError::Request {
                message: "network unreachable".to_string(),
            });
        }
        Ok(self.results.iter().take(limit).cloned().collect())
    }
}

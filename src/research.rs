//! The iterative research loop.
//!
//! ```text
//! Init → Searching → Summarizing → Reflecting → Querying ─┐
//!            ▲                                            │
//!            └────────────── next iteration ──────────────┘
//!                                   (after max_loops) → Done
//! ```
//!
//! Each iteration searches for the current query, appends a summary of the
//! results to the running summary, asks for knowledge gaps, and derives the
//! next query from them. The iteration count is the only termination
//! control; any search or completion failure aborts the run.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::agent::message::TokenUsage;
use crate::agent::prompt::{PromptSet, build_query_prompt, build_summary_prompt};
use crate::agent::query::extract_query;
use crate::agent::role::AgentSet;
use crate::agent::traits::{Agent, AgentResponse};
use crate::agent::{LlmProvider, ResearchConfig};
use crate::error::Result;
use crate::search::{WebSearch, search_formatted};

/// Heading that opens every report.
const REPORT_HEADER: &str = "# Research Summary";
/// Heading of the footer that repeats the topic.
const REPORT_FOOTER: &str = "## Topic";

/// Position of the loop within an iteration.
///
/// Data produced by one step and consumed by the next travels inside the
/// state, so nothing outlives the iteration that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchState {
    /// Before the first iteration.
    Init,
    /// About to search for the current query.
    Searching,
    /// Holding formatted search results to summarize.
    Summarizing {
        /// Citation list from the search step.
        results: String,
    },
    /// About to look for gaps in the running summary.
    Reflecting,
    /// Holding the reflector's gaps, about to derive the next query.
    Querying {
        /// Gap analysis from the reflect step.
        gaps: String,
    },
    /// All iterations finished.
    Done,
}

impl ResearchState {
    /// Short state name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Searching => "searching",
            Self::Summarizing { .. } => "summarizing",
            Self::Reflecting => "reflecting",
            Self::Querying { .. } => "querying",
            Self::Done => "done",
        }
    }
}

/// Aggregate statistics for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Completed iterations.
    pub iterations: usize,
    /// Search calls issued.
    pub searches: usize,
    /// Completion calls issued.
    pub completions: usize,
    /// Prompt tokens across all completions.
    pub prompt_tokens: u64,
    /// Completion tokens across all completions.
    pub completion_tokens: u64,
    /// Cost at the configured prices.
    pub cost: f64,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u128,
}

impl RunStats {
    fn record(&mut self, usage: TokenUsage) {
        self.completions += 1;
        self.prompt_tokens += u64::from(usage.prompt_tokens);
        self.completion_tokens += u64::from(usage.completion_tokens);
    }
}

/// Outcome of a research run.
#[derive(Debug, Clone)]
pub struct ResearchReport {
    /// The topic as supplied.
    pub topic: String,
    /// The running summary after the final iteration (untrimmed).
    pub summary: String,
    /// Every query that was searched, in order.
    pub queries: Vec<String>,
    /// Run statistics.
    pub stats: RunStats,
}

impl ResearchReport {
    /// Renders the Markdown report: header, trimmed summary, topic footer.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{REPORT_HEADER}\n\n{}\n\n{REPORT_FOOTER}\n{}",
            self.summary.trim(),
            self.topic
        )
    }
}

impl fmt::Display for ResearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Drives the search → summarize → reflect → re-query loop.
pub struct ResearchLoop {
    provider: Arc<dyn LlmProvider>,
    search: Arc<dyn WebSearch>,
    config: ResearchConfig,
    agents: AgentSet,
}

impl ResearchLoop {
    /// Creates a loop with agents built from `prompts`.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn WebSearch>,
        config: ResearchConfig,
        prompts: &PromptSet,
    ) -> Self {
        let agents = AgentSet::new(&config, prompts);
        Self {
            provider,
            search,
            config,
            agents,
        }
    }

    /// Runs `max_loops` iterations for `topic` and returns the report.
    ///
    /// Every run starts from an empty summary with the topic as first query.
    ///
    /// # Errors
    ///
    /// Returns the first search or completion error; no partial report is
    /// produced.
    pub async fn run(&self, topic: &str) -> Result<ResearchReport> {
        let start = Instant::now();
        let mut run = RunState::new(topic);
        let mut state = ResearchState::Init;

        loop {
            debug!(state = state.name(), iteration = run.stats.iterations, "research state");
            state = match state {
                ResearchState::Init => self.next_iteration(&run),
                ResearchState::Searching => {
                    info!(iteration = run.stats.iterations + 1, query = %run.query, "research loop");
                    let results = search_formatted(
                        self.search.as_ref(),
                        &run.query,
                        self.config.results_per_search,
                    )
                    .await?;
                    run.stats.searches += 1;
                    run.queries.push(run.query.clone());
                    ResearchState::Summarizing { results }
                }
                ResearchState::Summarizing { results } => {
                    let prompt = build_summary_prompt(&run.topic, &results);
                    let reply = self.call(&self.agents.summary, &prompt, &mut run).await?;
                    run.append_summary(&reply.content);
                    ResearchState::Reflecting
                }
                ResearchState::Reflecting => {
                    let summary = run.summary.clone();
                    let reply = self.call(&self.agents.reflect, &summary, &mut run).await?;
                    ResearchState::Querying {
                        gaps: reply.content,
                    }
                }
                ResearchState::Querying { gaps } => {
                    let prompt = build_query_prompt(&run.topic, &run.summary, &gaps);
                    let reply = self.call(&self.agents.query, &prompt, &mut run).await?;
                    run.set_query(extract_query(&reply.content));
                    run.stats.iterations += 1;
                    self.next_iteration(&run)
                }
                ResearchState::Done => break,
            };
        }

        run.stats.cost = self
            .config
            .cost(run.stats.prompt_tokens, run.stats.completion_tokens);
        run.stats.elapsed_ms = start.elapsed().as_millis();
        info!(
            iterations = run.stats.iterations,
            completions = run.stats.completions,
            prompt_tokens = run.stats.prompt_tokens,
            completion_tokens = run.stats.completion_tokens,
            cost = run.stats.cost,
            elapsed_ms = run.stats.elapsed_ms,
            "research complete"
        );

        Ok(ResearchReport {
            topic: run.topic,
            summary: run.summary,
            queries: run.queries,
            stats: run.stats,
        })
    }

    const fn next_iteration(&self, run: &RunState) -> ResearchState {
        if run.stats.iterations < self.config.max_loops {
            ResearchState::Searching
        } else {
            ResearchState::Done
        }
    }

    async fn call(
        &self,
        agent: &dyn Agent,
        user_msg: &str,
        run: &mut RunState,
    ) -> Result<AgentResponse> {
        let reply = agent.execute(self.provider.as_ref(), user_msg).await?;
        run.stats.record(reply.usage);
        Ok(reply)
    }
}

impl fmt::Debug for ResearchLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResearchLoop")
            .field("provider", &self.provider.name())
            .field("search", &self.search.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Mutable state owned by a single run.
struct RunState {
    topic: String,
    query: String,
    summary: String,
    queries: Vec<String>,
    stats: RunStats,
}

impl RunState {
    fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            query: topic.to_string(),
            summary: String::new(),
            queries: Vec::new(),
            stats: RunStats::default(),
        }
    }

    /// Appends to the running summary; it is never overwritten.
    fn append_summary(&mut self, text: &str) {
        if !self.summary.is_empty() {
            self.summary.push('\n');
        }
        self.summary.push_str(text);
    }

    /// Replaces the query unless extraction came back empty.
    fn set_query(&mut self, next: String) {
        if next.is_empty() {
            warn!(query = %self.query, "query generator returned nothing usable; keeping previous query");
        } else {
            self.query = next;
        }
    }
}

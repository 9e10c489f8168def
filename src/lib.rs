//! # LDR-RS
//!
//! Local deep researcher: drives a local OpenAI-compatible model through an
//! iterative search → summarize → reflect → re-query loop and produces a
//! Markdown research summary for a topic.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ldr_rs::agent::{PromptSet, ResearchConfig, create_provider};
//! use ldr_rs::research::ResearchLoop;
//! use ldr_rs::search::DuckDuckGoSearch;
//!
//! # async fn example() -> ldr_rs::Result<()> {
//! let config = ResearchConfig::from_env()?;
//! let provider = create_provider(&config)?;
//! let search = Arc::new(DuckDuckGoSearch::new()?);
//! let research = ResearchLoop::new(provider, search, config, &PromptSet::defaults());
//!
//! let report = research.run("solar panels").await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod error;
pub mod research;
pub mod search;

#[cfg(test)]
mod test_server;

pub use error::{AgentError, ConfigError, Error, Result, SearchError};
pub use research::{ResearchLoop, ResearchReport, ResearchState, RunStats};

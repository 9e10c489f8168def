//! LLM agents for the research loop.
//!
//! Three role-bound agents share one completion service through a
//! pluggable provider abstraction backed by OpenAI-compatible APIs.
//!
//! # Architecture
//!
//! ```text
//! ResearchConfig ──► create_provider ──► Arc<dyn LlmProvider>
//!        │                                      ▲
//!        └──► AgentSet ─┬─ SummaryAgent ────────┤
//!                       ├─ ReflectAgent ────────┤
//!                       └─ QueryAgent ──────────┘
//!                              │
//!                              └─► extract_query
//! ```

pub mod client;
pub mod config;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod query;
pub mod role;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export key types
pub use client::create_provider;
pub use config::ResearchConfig;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use prompt::PromptSet;
pub use provider::LlmProvider;
pub use query::extract_query;
pub use role::{AgentRole, AgentSet, RoleAgent};
pub use traits::{Agent, AgentResponse};

//! Role-bound research agents.
//!
//! One type covers all three roles; the role only selects the name and the
//! system prompt. Model and sampling settings come from the shared
//! [`ResearchConfig`].

use async_trait::async_trait;

use super::config::ResearchConfig;
use super::prompt::PromptSet;
use super::traits::Agent;

/// The fixed set of roles in the research loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    /// Turns the running summary and gaps into the next search query.
    QueryGenerator,
    /// Turns raw search results into summary text.
    Summarizer,
    /// Finds knowledge gaps in the running summary.
    Reflector,
}

impl AgentRole {
    /// Agent name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QueryGenerator => "QueryAgent",
            Self::Summarizer => "SummaryAgent",
            Self::Reflector => "ReflectAgent",
        }
    }

    /// Picks this role's system prompt out of a prompt set.
    #[must_use]
    pub fn system_prompt(self, prompts: &PromptSet) -> &str {
        match self {
            Self::QueryGenerator => &prompts.query,
            Self::Summarizer => &prompts.summary,
            Self::Reflector => &prompts.reflect,
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable agent bound to one [`AgentRole`].
#[derive(Debug, Clone)]
pub struct RoleAgent {
    role: AgentRole,
    model: String,
    temperature: Option<f32>,
    system_prompt: String,
}

impl RoleAgent {
    /// Creates an agent for `role` using the shared configuration and prompts.
    #[must_use]
    pub fn new(role: AgentRole, config: &ResearchConfig, prompts: &PromptSet) -> Self {
        Self {
            role,
            model: config.model.clone(),
            temperature: config.temperature,
            system_prompt: role.system_prompt(prompts).to_string(),
        }
    }
}

#[async_trait]
impl Agent for RoleAgent {
    fn name(&self) -> &'static str {
        self.role.as_str()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn temperature(&self) -> Option<f32> {
        self.temperature
    }
}

/// The three agents used by one research run.
#[derive(Debug, Clone)]
pub struct AgentSet {
    /// Query generator.
    pub query: RoleAgent,
    /// Summarizer.
    pub summary: RoleAgent,
    /// Reflector.
    pub reflect: RoleAgent,
}

impl AgentSet {
    /// Builds all three role agents over the same configuration.
    #[must_use]
    pub fn new(config: &ResearchConfig, prompts: &PromptSet) -> Self {
        Self {
            query: RoleAgent::new(AgentRole::QueryGenerator, config, prompts),
            summary: RoleAgent::new(AgentRole::Summarizer, config, prompts),
            reflect: RoleAgent::new(AgentRole::Reflector, config, prompts),
        }
    }
}

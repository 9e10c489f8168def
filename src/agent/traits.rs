//! Agent trait definition.
//!
//! Every research role implements this trait, which gives the research loop
//! a uniform way to call the shared completion service.

use async_trait::async_trait;
use tracing::debug;

use super::message::{ChatMessage, ChatRequest, TokenUsage, system_message, user_message};
use super::provider::LlmProvider;
use crate::error::AgentError;

/// Response from an agent execution.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// The agent's text output.
    pub content: String,
    /// Token usage for this call.
    pub usage: TokenUsage,
}

/// Trait implemented by all agents in the system.
///
/// Agents encapsulate a specific role with a fixed system prompt and model.
/// They keep no memory between calls; all continuity is carried in the
/// conversation passed to [`Agent::respond`].
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent name for logging and identification.
    fn name(&self) -> &'static str;

    /// Model identifier to use for this agent.
    fn model(&self) -> &str;

    /// System prompt that defines the agent's role and behavior.
    fn system_prompt(&self) -> &str;

    /// Sampling temperature. `None` defers to the server default.
    fn temperature(&self) -> Option<f32> {
        None
    }

    /// Maximum tokens for the response. `None` defers to the server default.
    fn max_tokens(&self) -> Option<u32> {
        None
    }

    /// Sends the system prompt followed by `conversation` and returns the
    /// raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] on API failures or malformed replies.
    async fn respond(
        &self,
        provider: &dyn LlmProvider,
        conversation: &[ChatMessage],
    ) -> Result<AgentResponse, AgentError> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(system_message(self.system_prompt()));
        messages.extend_from_slice(conversation);

        let request = ChatRequest {
            model: self.model().to_string(),
            messages,
            temperature: self.temperature(),
            max_tokens: self.max_tokens(),
        };

        let response = provider.chat(&request).await?;
        debug!(
            agent = self.name(),
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "agent replied"
        );

        Ok(AgentResponse {
            content: response.content,
            usage: response.usage,
        })
    }

    /// Executes the agent with a single user turn.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] on API failures or malformed replies.
    async fn execute(
        &self,
        provider: &dyn LlmProvider,
        user_msg: &str,
    ) -> Result<AgentResponse, AgentError> {
        self.respond(provider, &[user_message(user_msg)]).await
    }
}

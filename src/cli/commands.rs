//! CLI command implementation.
//!
//! Builds every collaborator from configuration and runs one research loop.

use std::sync::Arc;

use tracing::debug;

use crate::agent::{PromptSet, ResearchConfig, create_provider};
use crate::cli::parser::Cli;
use crate::error::Result;
use crate::research::{ResearchLoop, ResearchReport};
use crate::search::DuckDuckGoSearch;

/// Executes the CLI command.
///
/// Reads configuration from the environment and returns the rendered
/// report on success.
///
/// # Errors
///
/// Returns an error on invalid configuration or any search or completion
/// failure.
pub async fn execute(cli: &Cli) -> Result<String> {
    let config = ResearchConfig::from_env()?;
    let report = run_research(&cli.topic, config).await?;
    Ok(report.render())
}

/// Runs a research loop against the configured provider and DuckDuckGo.
///
/// # Errors
///
/// Returns an error on unsupported provider names or any search or
/// completion failure.
pub async fn run_research(topic: &str, config: ResearchConfig) -> Result<ResearchReport> {
    let prompt_dir = config.prompt_dir.clone().or_else(PromptSet::default_dir);
    let prompts = PromptSet::load(prompt_dir.as_deref());
    debug!(
        model = %config.model,
        base_url = %config.base_url,
        max_loops = config.max_loops,
        results_per_search = config.results_per_search,
        prompt_dir = ?prompt_dir,
        "starting research"
    );

    let provider = create_provider(&config)?;
    let search = Arc::new(DuckDuckGoSearch::new()?);
    let research = ResearchLoop::new(provider, search, config, &prompts);
    research.run(topic).await
}

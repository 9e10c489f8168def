//! System prompts and template builders for the research agents.
//!
//! Prompts define each role's behavior. Template builders format the user
//! turn for each step of the loop; all continuity between steps lives in
//! these strings.

use std::path::{Path, PathBuf};

/// System prompt for the query generator.
pub const QUERY_SYSTEM_PROMPT: &str =
    "Return only a single-line search query string. No formatting or explanations.";

/// System prompt for the summarizer.
pub const SUMMARY_SYSTEM_PROMPT: &str =
    "Summarize the search results in Markdown with source citations.";

/// System prompt for the reflector.
pub const REFLECT_SYSTEM_PROMPT: &str =
    "Identify 2-3 key knowledge gaps or follow-up questions based on the summary.";

/// Default prompt directory, relative to the user's config directory.
const DEFAULT_PROMPT_DIR: &str = "ldr-rs/prompts";
/// Filename for the query generator prompt template.
const QUERY_FILENAME: &str = "query.md";
/// Filename for the summarizer prompt template.
const SUMMARY_FILENAME: &str = "summary.md";
/// Filename for the reflector prompt template.
const REFLECT_FILENAME: &str = "reflect.md";

/// A set of system prompts for all research roles.
///
/// Loaded from override files when a prompt directory is configured,
/// falling back to compiled-in defaults per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    /// System prompt for the query generator.
    pub query: String,
    /// System prompt for the summarizer.
    pub summary: String,
    /// System prompt for the reflector.
    pub reflect: String,
}

impl PromptSet {
    /// Loads prompts from the given directory, falling back to compiled-in defaults.
    ///
    /// Each file is loaded independently; a missing or blank file uses its
    /// default.
    #[must_use]
    pub fn load(prompt_dir: Option<&Path>) -> Self {
        let load_file = |filename: &str, default: &str| -> String {
            prompt_dir
                .map(|dir| dir.join(filename))
                .and_then(|path| std::fs::read_to_string(&path).ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            query: load_file(QUERY_FILENAME, QUERY_SYSTEM_PROMPT),
            summary: load_file(SUMMARY_FILENAME, SUMMARY_SYSTEM_PROMPT),
            reflect: load_file(REFLECT_FILENAME, REFLECT_SYSTEM_PROMPT),
        }
    }

    /// Returns compiled-in defaults without checking the filesystem.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            query: QUERY_SYSTEM_PROMPT.to_string(),
            summary: SUMMARY_SYSTEM_PROMPT.to_string(),
            reflect: REFLECT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Returns the default prompt directory (`~/.config/ldr-rs/prompts` on Linux).
    ///
    /// Returns `None` if the config directory cannot be determined.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DEFAULT_PROMPT_DIR))
    }
}

impl Default for PromptSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Builds the summarizer's user turn from the topic and formatted results.
#[must_use]
pub fn build_summary_prompt(topic: &str, search_results: &str) -> String {
    format!("Topic: {topic}\nSearch Results:\n{search_results}")
}

/// Builds the query generator's user turn.
#[must_use]
pub fn build_query_prompt(topic: &str, summary: &str, gaps: &str) -> String {
    format!("Topic: {topic}\nSummary:\n{summary}\nGaps:\n{gaps}")
}

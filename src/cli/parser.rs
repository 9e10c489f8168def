//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::Parser;

/// LDR-RS: local deep researcher.
///
/// Iteratively searches the web, summarizes the results with a local
/// OpenAI-compatible model, reflects on knowledge gaps, and re-queries.
/// Prints a Markdown research summary to stdout.
#[derive(Parser, Debug)]
#[command(name = "ldr-rs")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"Environment:
  LOCAL_LLM                 Model identifier (default: llama3.2)
  OLLAMA_BASE_URL           Completion endpoint (default: http://localhost:11434/v1)
  MAX_WEB_RESEARCH_LOOPS    Research iterations (default: 2)
  RESULTS_PER_SEARCH        Search results per iteration (default: 5)
  LDR_PROMPT_DIR            Directory with query.md / summary.md / reflect.md overrides

Examples:
  ldr-rs "solar panels"
  MAX_WEB_RESEARCH_LOOPS=4 ldr-rs "perovskite stability" > report.md
"#)]
pub struct Cli {
    /// Research topic to explore.
    #[arg(value_parser = parse_topic)]
    pub topic: String,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Rejects topics that are empty once surrounding whitespace is removed.
fn parse_topic(raw: &str) -> Result<String, String> {
    let topic = raw.trim();
    if topic.is_empty() {
        return Err("topic cannot be blank".to_string());
    }
    Ok(topic.to_string())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_topic() {
        let cli = Cli::try_parse_from(["ldr-rs", "solar panels"]).unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.topic, "solar panels");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_verbose() {
        let cli = Cli::try_parse_from(["ldr-rs", "-v", "rust"]).unwrap_or_else(|_| unreachable!());
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_topic_is_an_error() {
        assert!(Cli::try_parse_from(["ldr-rs"]).is_err());
    }

    #[test]
    fn test_empty_topic_is_an_error() {
        assert!(Cli::try_parse_from(["ldr-rs", ""]).is_err());
    }

    #[test]
    fn test_blank_topic_is_an_error() {
        assert!(Cli::try_parse_from(["ldr-rs", " \t "]).is_err());
    }

    #[test]
    fn test_topic_is_trimmed() {
        let cli = Cli::try_parse_from(["ldr-rs", "  solar panels \n"])
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.topic, "solar panels");
    }
}

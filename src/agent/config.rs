//! Research configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! It is read once at startup and shared read-only by every agent and the loop.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default provider backend.
const DEFAULT_PROVIDER: &str = "openai";
/// Placeholder credential; local OpenAI-compatible servers ignore it but the
/// client requires one.
const DEFAULT_API_KEY: &str = "ollama";
/// Default completion endpoint (local Ollama).
const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
/// Default model identifier.
const DEFAULT_MODEL: &str = "llama3.2";
/// Default number of research iterations.
const DEFAULT_MAX_LOOPS: usize = 2;
/// Default number of search results fetched per iteration.
const DEFAULT_RESULTS_PER_SEARCH: usize = 5;

/// Environment variable naming the model.
pub const ENV_MODEL: &str = "LOCAL_LLM";
/// Environment variable naming the completion endpoint.
pub const ENV_BASE_URL: &str = "OLLAMA_BASE_URL";
/// Environment variable holding the iteration count.
pub const ENV_MAX_LOOPS: &str = "MAX_WEB_RESEARCH_LOOPS";
/// Environment variable holding the per-search result count.
pub const ENV_RESULTS_PER_SEARCH: &str = "RESULTS_PER_SEARCH";

/// Configuration shared by all research agents.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchConfig {
    /// LLM provider name (e.g., "openai").
    pub provider: String,
    /// API key sent to the completion service.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Model identifier used by every role.
    pub model: String,
    /// Number of search/summarize/reflect iterations. Zero is allowed.
    pub max_loops: usize,
    /// Search results requested per iteration (at least 1).
    pub results_per_search: usize,
    /// Sampling temperature; `None` leaves it to the server.
    pub temperature: Option<f32>,
    /// Price per 1K prompt tokens. Zero for local models.
    pub prompt_price: f64,
    /// Price per 1K completion tokens. Zero for local models.
    pub completion_price: f64,
    /// Directory containing prompt override files.
    pub prompt_dir: Option<PathBuf>,
}

impl ResearchConfig {
    /// Creates a new builder for `ResearchConfig`.
    #[must_use]
    pub fn builder() -> ResearchConfigBuilder {
        ResearchConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable does not parse
    /// or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env()?.build()
    }

    /// Cost of the given token counts at the configured prices.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cost(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        (prompt_tokens as f64 / 1000.0).mul_add(
            self.prompt_price,
            completion_tokens as f64 / 1000.0 * self.completion_price,
        )
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_loops: DEFAULT_MAX_LOOPS,
            results_per_search: DEFAULT_RESULTS_PER_SEARCH,
            temperature: None,
            prompt_price: 0.0,
            completion_price: 0.0,
            prompt_dir: None,
        }
    }
}

/// Builder for [`ResearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct ResearchConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    max_loops: Option<usize>,
    results_per_search: Option<usize>,
    temperature: Option<f32>,
    prompt_price: Option<f64>,
    completion_price: Option<f64>,
    prompt_dir: Option<PathBuf>,
}

impl ResearchConfigBuilder {
    /// Populates unset fields from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable numeric values.
    pub fn from_env(self) -> Result<Self, ConfigError> {
        self.from_lookup(|key| std::env::var(key).ok())
    }

    /// Populates unset fields from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable numeric values.
    pub fn from_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.provider.is_none() {
            self.provider = lookup("LDR_PROVIDER");
        }
        if self.api_key.is_none() {
            self.api_key = lookup("OPENAI_API_KEY");
        }
        if self.base_url.is_none() {
            self.base_url = lookup(ENV_BASE_URL);
        }
        if self.model.is_none() {
            self.model = lookup(ENV_MODEL);
        }
        if self.max_loops.is_none() {
            self.max_loops = parse_var(&lookup, ENV_MAX_LOOPS)?;
        }
        if self.results_per_search.is_none() {
            self.results_per_search = parse_var(&lookup, ENV_RESULTS_PER_SEARCH)?;
        }
        if self.prompt_dir.is_none() {
            self.prompt_dir = lookup("LDR_PROMPT_DIR").map(PathBuf::from);
        }
        Ok(self)
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the completion endpoint base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the iteration count.
    #[must_use]
    pub const fn max_loops(mut self, n: usize) -> Self {
        self.max_loops = Some(n);
        self
    }

    /// Sets the search results per iteration.
    #[must_use]
    pub const fn results_per_search(mut self, n: usize) -> Self {
        self.results_per_search = Some(n);
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Sets prompt and completion prices per 1K tokens.
    #[must_use]
    pub const fn pricing(mut self, prompt: f64, completion: f64) -> Self {
        self.prompt_price = Some(prompt);
        self.completion_price = Some(completion);
        self
    }

    /// Sets the prompt template directory.
    #[must_use]
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    /// Builds the [`ResearchConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `results_per_search` is zero.
    pub fn build(self) -> Result<ResearchConfig, ConfigError> {
        let results_per_search = self
            .results_per_search
            .unwrap_or(DEFAULT_RESULTS_PER_SEARCH);
        if results_per_search == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_RESULTS_PER_SEARCH.to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(ResearchConfig {
            provider: self
                .provider
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            api_key: self.api_key.unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_loops: self.max_loops.unwrap_or(DEFAULT_MAX_LOOPS),
            results_per_search,
            temperature: self.temperature,
            prompt_price: self.prompt_price.unwrap_or(0.0),
            completion_price: self.completion_price.unwrap_or(0.0),
            prompt_dir: self.prompt_dir,
        })
    }
}

/// Parses an optional numeric variable, rejecting garbage instead of
/// silently falling back to the default.
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_builder_defaults() {
        let config = ResearchConfig::builder()
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config, ResearchConfig::default());
        assert_eq!(config.provider, "openai");
        assert_eq!(config.api_key, "ollama");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.max_loops, 2);
        assert_eq!(config.results_per_search, 5);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ResearchConfig::builder()
            .model("qwen2.5")
            .base_url("http://127.0.0.1:8080/v1")
            .max_loops(4)
            .results_per_search(3)
            .temperature(0.2)
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.model, "qwen2.5");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/v1");
        assert_eq!(config.max_loops, 4);
        assert_eq!(config.results_per_search, 3);
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_builder_rejects_zero_results() {
        let result = ResearchConfig::builder().results_per_search(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_loops_allowed() {
        let config = ResearchConfig::builder()
            .max_loops(0)
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.max_loops, 0);
    }

    #[test]
    fn test_lookup_populates_unset_fields() {
        let lookup = lookup_from(&[
            ("LOCAL_LLM", "mistral"),
            ("OLLAMA_BASE_URL", "http://gpu-box:11434/v1"),
            ("MAX_WEB_RESEARCH_LOOPS", "3"),
            ("RESULTS_PER_SEARCH", " 7 "),
        ]);
        let config = ResearchConfig::builder()
            .from_lookup(lookup)
            .and_then(ResearchConfigBuilder::build)
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.model, "mistral");
        assert_eq!(config.base_url, "http://gpu-box:11434/v1");
        assert_eq!(config.max_loops, 3);
        assert_eq!(config.results_per_search, 7);
    }

    #[test]
    fn test_explicit_values_beat_lookup() {
        let lookup = lookup_from(&[("LOCAL_LLM", "mistral"), ("MAX_WEB_RESEARCH_LOOPS", "9")]);
        let config = ResearchConfig::builder()
            .model("llama3.1")
            .max_loops(1)
            .from_lookup(lookup)
            .and_then(ResearchConfigBuilder::build)
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.model, "llama3.1");
        assert_eq!(config.max_loops, 1);
    }

    #[test]
    fn test_lookup_rejects_garbage_numbers() {
        let lookup = lookup_from(&[("MAX_WEB_RESEARCH_LOOPS", "two")]);
        let err = ResearchConfig::builder().from_lookup(lookup);
        assert!(matches!(
            err,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "MAX_WEB_RESEARCH_LOOPS"
        ));

        let lookup = lookup_from(&[("RESULTS_PER_SEARCH", "-1")]);
        assert!(ResearchConfig::builder().from_lookup(lookup).is_err());
    }

    #[test]
    fn test_cost_defaults_to_zero() {
        let config = ResearchConfig::default();
        assert!(config.cost(10_000, 5_000).abs() < f64::EPSILON);

        let priced = ResearchConfig::builder()
            .pricing(1.0, 2.0)
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert!((priced.cost(1000, 500) - 2.0).abs() < 1e-9);
    }
}

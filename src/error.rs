//! Error types for LDR-RS.
//!
//! Each external collaborator gets its own error enum; [`Error`] wraps them
//! for the crate-level [`Result`] alias. None of these are recovered from
//! locally: a failed search or completion aborts the whole run.

use thiserror::Error;

/// Crate-level result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for a research run.
#[derive(Debug, Error)]
pub enum Error {
    /// Completion service failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Web search failure.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Invalid startup configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while talking to the completion service.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The HTTP call to the completion endpoint failed or returned an error body.
    #[error("completion request failed: {message}")]
    ApiRequest {
        /// Underlying error description.
        message: String,
    },

    /// No provider is registered under the configured name.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// The configured provider name.
        name: String,
    },

    /// The service answered without any choices.
    #[error("completion service returned no choices for model '{model}'")]
    EmptyResponse {
        /// Model named in the request.
        model: String,
    },
}

/// Errors raised by a [`WebSearch`](crate::search::WebSearch) backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was empty or whitespace.
    #[error("search query cannot be empty")]
    InvalidQuery,

    /// The requested result count was zero.
    #[error("result limit must be at least 1 (got {limit})")]
    InvalidLimit {
        /// The rejected limit.
        limit: usize,
    },

    /// Transport-level failure.
    #[error("search request failed: {message}")]
    Request {
        /// Underlying error description.
        message: String,
    },

    /// The search endpoint answered with anything other than `200 OK`.
    #[error("search endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request {
            message: err.to_string(),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed or is out of range.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Configuration key (usually the environment variable name).
        key: String,
        /// The offending raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

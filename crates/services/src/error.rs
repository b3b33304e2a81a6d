//! Shared error types for the services crate.

use thiserror::Error;

use premise_core::RateLimitError;
use premise_core::model::GenerationSettingsError;

/// Configuration problems, detected before any network call is attempted.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(
        "OpenRouter API key not set. Please set the OPENROUTER_API_KEY environment variable or .env file."
    )]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
    #[error(transparent)]
    Generation(#[from] GenerationSettingsError),
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),
}

/// Errors emitted by `ProblemService`.
///
/// Every variant is terminal for the attempt that produced it; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Error from completion API: {status} - {body}")]
    Api { status: u16, body: String },
    #[error("Error generating problem: {cause}")]
    Transport { cause: String },
    #[error("completion API returned an unreadable response: {cause}")]
    InvalidResponse { cause: String },
    #[error("completion API returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProblemError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::InvalidResponse {
                cause: err.to_string(),
            };
        }
        let cause = if err.is_timeout() {
            format!("request timed out ({err})")
        } else {
            err.to_string()
        };
        Self::Transport { cause }
    }
}

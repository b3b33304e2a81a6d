use std::sync::Arc;

use premise_core::model::{GeneratedProblem, GenerationSettings, ProblemRequest};

use crate::config::ProviderConfig;
use crate::error::{ConfigError, ProblemError};
use crate::problems::client::{CompletionApi, CompletionRequest, HttpCompletionApi};
use crate::problems::markup::sanitize_math_markup;
use crate::problems::parse::{ParseWarning, parse_response};
use crate::problems::prompt::build_prompt;

/// A parsed, display-ready completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOutcome {
    pub problem: GeneratedProblem,
    pub warning: Option<ParseWarning>,
}

/// Formats prompts, calls the completion API once, and parses the answer.
///
/// Holds no session state; callers own what happens with the result.
#[derive(Clone)]
pub struct ProblemService {
    api: Option<Arc<dyn CompletionApi>>,
    settings: GenerationSettings,
}

impl ProblemService {
    /// Build the service from loaded configuration.
    ///
    /// Without an API key the service is created disabled and every call fails
    /// with `ConfigError::MissingApiKey`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HttpClient` if the HTTP client cannot be built.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let api = match config.api_key.as_deref() {
            Some(key) => {
                let api = HttpCompletionApi::new(
                    key,
                    config.generation.api_base_url(),
                    config.timeout,
                )?;
                Some(Arc::new(api) as Arc<dyn CompletionApi>)
            }
            None => None,
        };
        Ok(Self::new(api, config.generation.clone()))
    }

    #[must_use]
    pub fn new(api: Option<Arc<dyn CompletionApi>>, settings: GenerationSettings) -> Self {
        Self { api, settings }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.api.is_some()
    }

    #[must_use]
    pub fn completion_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model().to_string(),
            system: self.settings.system_prompt().to_string(),
            prompt: prompt.to_string(),
            max_tokens: self.settings.max_tokens(),
            temperature: self.settings.temperature(),
        }
    }

    /// Build the prompt for `request` and fetch a problem for it.
    ///
    /// # Errors
    ///
    /// See [`ProblemService::fetch`].
    pub async fn generate(&self, request: &ProblemRequest) -> Result<FetchOutcome, ProblemError> {
        self.fetch(&build_prompt(request)).await
    }

    /// Send one prompt, then parse and clean up the completion.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::Config` before any network call when no API key is
    /// configured, otherwise whatever the completion API reports.
    pub async fn fetch(&self, prompt: &str) -> Result<FetchOutcome, ProblemError> {
        let api = self.api.as_ref().ok_or(ConfigError::MissingApiKey)?;

        let content = api.complete(&self.completion_request(prompt)).await?;
        let parsed = parse_response(&content);
        if let Some(warning) = parsed.warning {
            tracing::warn!(?warning, "completion did not follow the response format");
        }

        let problem = GeneratedProblem::new(
            sanitize_math_markup(&parsed.problem),
            parsed.solution.as_deref().map(sanitize_math_markup),
        );
        Ok(FetchOutcome {
            problem,
            warning: parsed.warning,
        })
    }
}

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful math teacher who creates fun, real-world math problems.";
pub const DEFAULT_MAX_TOKENS: u32 = 400;
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Fixed parameters sent with every completion request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    api_base_url: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Clone, Debug, Default)]
pub struct GenerationSettingsDraft {
    pub api_base_url: Option<String>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GenerationSettingsError {
    #[error("invalid base URL")]
    InvalidBaseUrl,
    #[error("max_tokens must be greater than zero")]
    ZeroMaxTokens,
    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    TemperatureOutOfRange(f32),
}

impl GenerationSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `GenerationSettingsError` if the base URL does not parse, `max_tokens`
    /// is zero, or the temperature is outside `0.0..=2.0`.
    pub fn validate(self) -> Result<GenerationSettings, GenerationSettingsError> {
        let api_base_url = normalize_optional(self.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let model = normalize_optional(self.model).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let system_prompt = normalize_optional(self.system_prompt)
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        let max_tokens = self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);

        if Url::parse(&api_base_url).is_err() {
            return Err(GenerationSettingsError::InvalidBaseUrl);
        }
        if max_tokens == 0 {
            return Err(GenerationSettingsError::ZeroMaxTokens);
        }
        if !(0.0..=2.0).contains(&temperature) {
            return Err(GenerationSettingsError::TemperatureOutOfRange(temperature));
        }

        Ok(GenerationSettings {
            api_base_url,
            model,
            system_prompt,
            max_tokens,
            temperature,
        })
    }
}

impl GenerationSettings {
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

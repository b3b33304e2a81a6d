use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use premise_core::RateLimitSettings;
use premise_core::model::{GenerationSettings, GenerationSettingsDraft};
use premise_core::rate_limit::{DEFAULT_COOLDOWN_SECS, DEFAULT_MAX_REQUESTS};

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_VAR: &str = "MATH_PREMISE_BASE_URL";
pub const MODEL_VAR: &str = "MATH_PREMISE_MODEL";
pub const MAX_TOKENS_VAR: &str = "MATH_PREMISE_MAX_TOKENS";
pub const TEMPERATURE_VAR: &str = "MATH_PREMISE_TEMPERATURE";
pub const TIMEOUT_VAR: &str = "MATH_PREMISE_TIMEOUT_SECS";
pub const MAX_REQUESTS_VAR: &str = "MATH_PREMISE_MAX_REQUESTS";
pub const COOLDOWN_VAR: &str = "MATH_PREMISE_COOLDOWN_SECS";
pub const REQUIRE_NEW_INPUTS_VAR: &str = "MATH_PREMISE_REQUIRE_NEW_INPUTS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the generator needs from the environment.
///
/// A missing API key is not a load error: it is carried as `None` and reported
/// when a generation is attempted.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub generation: GenerationSettings,
    pub timeout: Duration,
    pub rate_limits: RateLimitSettings,
    pub require_new_inputs: bool,
}

impl ProviderConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to a malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration from any environment-like source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to a malformed value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let generation = GenerationSettingsDraft {
            api_base_url: lookup(BASE_URL_VAR),
            model: lookup(MODEL_VAR),
            system_prompt: None,
            max_tokens: parse_var(&lookup, MAX_TOKENS_VAR)?,
            temperature: parse_var(&lookup, TEMPERATURE_VAR)?,
        }
        .validate()?;

        let timeout_secs = parse_var(&lookup, TIMEOUT_VAR)?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: TIMEOUT_VAR,
                value: "0".into(),
            });
        }

        let rate_limits = RateLimitSettings::new(
            parse_var(&lookup, MAX_REQUESTS_VAR)?.unwrap_or(DEFAULT_MAX_REQUESTS),
            parse_var(&lookup, COOLDOWN_VAR)?.unwrap_or(DEFAULT_COOLDOWN_SECS),
        )?;

        let require_new_inputs = match lookup(REQUIRE_NEW_INPUTS_VAR) {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                key: REQUIRE_NEW_INPUTS_VAR,
                value: raw,
            })?,
        };

        Ok(Self {
            api_key,
            generation,
            timeout: Duration::from_secs(timeout_secs),
            rate_limits,
            require_new_inputs,
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            generation: GenerationSettings::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limits: RateLimitSettings::default(),
            require_new_inputs: false,
        }
    }
}

// Keep the key out of debug output and logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("generation", &self.generation)
            .field("timeout", &self.timeout)
            .field("rate_limits", &self.rate_limits)
            .field("require_new_inputs", &self.require_new_inputs)
            .finish()
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

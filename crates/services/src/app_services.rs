use std::sync::Arc;

use premise_core::RateLimitSettings;

use crate::Clock;
use crate::config::ProviderConfig;
use crate::error::ConfigError;
use crate::problems::ProblemService;
use crate::session::SessionController;

/// Assembles the app-facing services from loaded configuration.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    problems: Arc<ProblemService>,
    rate_limits: RateLimitSettings,
    require_new_inputs: bool,
}

impl AppServices {
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built.
    pub fn from_config(config: &ProviderConfig, clock: Clock) -> Result<Self, ConfigError> {
        let problems = ProblemService::from_config(config)?;
        if !problems.enabled() {
            tracing::warn!("no API key configured; generation will fail until one is set");
        }
        Ok(Self::new(
            clock,
            Arc::new(problems),
            config.rate_limits,
            config.require_new_inputs,
        ))
    }

    #[must_use]
    pub fn new(
        clock: Clock,
        problems: Arc<ProblemService>,
        rate_limits: RateLimitSettings,
        require_new_inputs: bool,
    ) -> Self {
        Self {
            clock,
            problems,
            rate_limits,
            require_new_inputs,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn problems(&self) -> Arc<ProblemService> {
        Arc::clone(&self.problems)
    }

    /// Fresh, independent session state for one user.
    #[must_use]
    pub fn new_session(&self) -> SessionController {
        SessionController::new(self.rate_limits).with_require_new_inputs(self.require_new_inputs)
    }
}

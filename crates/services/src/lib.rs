#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod problems;
pub mod session;

pub use premise_core::Clock;

pub use app_services::AppServices;
pub use config::ProviderConfig;
pub use error::{ConfigError, ProblemError};
pub use problems::{
    CompletionApi, CompletionRequest, FetchOutcome, HttpCompletionApi, ParseWarning,
    ProblemService,
};
pub use session::{Effect, SessionController, SessionEvent, SessionSnapshot, Trigger};

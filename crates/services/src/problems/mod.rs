mod client;
mod markup;
mod parse;
mod prompt;
mod service;

pub use client::{CompletionApi, CompletionRequest, HttpCompletionApi};
pub use markup::sanitize_math_markup;
pub use parse::{ParseWarning, ParsedResponse, parse_response};
pub use prompt::build_prompt;
pub use service::{FetchOutcome, ProblemService};

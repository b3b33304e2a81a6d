#![forbid(unsafe_code)]

pub mod model;
pub mod rate_limit;
pub mod time;

pub use rate_limit::{RateLimitError, RateLimitSettings, RateLimited, RateLimiter};
pub use time::Clock;

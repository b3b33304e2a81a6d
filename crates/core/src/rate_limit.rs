use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

pub const DEFAULT_MAX_REQUESTS: u32 = 1;
pub const DEFAULT_COOLDOWN_SECS: u32 = 60;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RateLimitError {
    #[error("max_requests must be at least 1")]
    ZeroMaxRequests,
    #[error("cooldown must be at least 1 second")]
    ZeroCooldown,
}

/// Rejection returned when the trailing window is full.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("rate limited, retry in {remaining_secs} seconds")]
pub struct RateLimited {
    pub remaining_secs: u32,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// How many generations are allowed per trailing cooldown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    max_requests: u32,
    cooldown_secs: u32,
}

impl RateLimitSettings {
    /// # Errors
    ///
    /// Returns `RateLimitError` if either value is zero.
    pub fn new(max_requests: u32, cooldown_secs: u32) -> Result<Self, RateLimitError> {
        if max_requests == 0 {
            return Err(RateLimitError::ZeroMaxRequests);
        }
        if cooldown_secs == 0 {
            return Err(RateLimitError::ZeroCooldown);
        }
        Ok(Self {
            max_requests,
            cooldown_secs,
        })
    }

    #[must_use]
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    #[must_use]
    pub fn cooldown_secs(&self) -> u32 {
        self.cooldown_secs
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::seconds(i64::from(self.cooldown_secs))
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
        }
    }
}

//
// ─── LIMITER ───────────────────────────────────────────────────────────────────
//

/// Sliding-log limiter: at most `max_requests` acquisitions inside any
/// trailing window of `cooldown`.
///
/// A timestamp whose age is at least `cooldown` no longer counts.
///
/// # Examples
///
/// ```
/// # use chrono::{Duration, Utc};
/// # use premise_core::{RateLimitSettings, RateLimiter};
/// let mut limiter = RateLimiter::new(RateLimitSettings::new(1, 60)?);
/// let t0 = Utc::now();
///
/// assert!(limiter.try_acquire(t0).is_ok());
/// let rejected = limiter.try_acquire(t0 + Duration::seconds(30)).unwrap_err();
/// assert_eq!(rejected.remaining_secs, 30);
/// assert!(limiter.try_acquire(t0 + Duration::seconds(61)).is_ok());
/// # Ok::<(), premise_core::RateLimitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    settings: RateLimitSettings,
    timestamps: VecDeque<DateTime<Utc>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            settings,
            timestamps: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> RateLimitSettings {
        self.settings
    }

    /// Timestamps currently held, oldest first.
    #[must_use]
    pub fn timestamps(&self) -> &VecDeque<DateTime<Utc>> {
        &self.timestamps
    }

    /// Drop entries that have aged out of the window ending at `now`.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let cooldown = self.settings.cooldown();
        while let Some(oldest) = self.timestamps.front() {
            if now - *oldest >= cooldown {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    #[must_use]
    pub fn has_capacity(&self, now: DateTime<Utc>) -> bool {
        self.in_window(now) < self.max_requests()
    }

    /// Time until the oldest in-window entry ages out, if the window is full.
    #[must_use]
    pub fn remaining_wait(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.has_capacity(now) {
            return None;
        }
        let cooldown = self.settings.cooldown();
        let oldest = self
            .timestamps
            .iter()
            .find(|stamp| now - **stamp < cooldown)?;
        let remaining = cooldown - (now - *oldest);
        // A clock that stepped backwards must not produce a wait beyond one window.
        Some(remaining.min(cooldown))
    }

    /// Record an acquisition at `now` if the window has room.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited` with the whole seconds (rounded down) until a slot frees up.
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> Result<(), RateLimited> {
        self.prune(now);
        if let Some(remaining) = self.remaining_wait(now) {
            let remaining_secs = remaining.num_seconds().max(0);
            return Err(RateLimited {
                remaining_secs: u32::try_from(remaining_secs).unwrap_or(u32::MAX),
            });
        }
        self.timestamps.push_back(now);
        Ok(())
    }

    fn in_window(&self, now: DateTime<Utc>) -> u32 {
        let cooldown = self.settings.cooldown();
        let count = self
            .timestamps
            .iter()
            .filter(|stamp| now - **stamp < cooldown)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn max_requests(&self) -> u32 {
        self.settings.max_requests()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn limiter(max_requests: u32, cooldown_secs: u32) -> RateLimiter {
        RateLimiter::new(RateLimitSettings::new(max_requests, cooldown_secs).unwrap())
    }

    #[test]
    fn settings_reject_zero_values() {
        assert_eq!(
            RateLimitSettings::new(0, 60).unwrap_err(),
            RateLimitError::ZeroMaxRequests
        );
        assert_eq!(
            RateLimitSettings::new(1, 0).unwrap_err(),
            RateLimitError::ZeroCooldown
        );
        assert_eq!(RateLimitSettings::default().max_requests(), 1);
        assert_eq!(RateLimitSettings::default().cooldown_secs(), 60);
    }

    #[test]
    fn one_per_minute_window() {
        let t0 = fixed_now();
        let mut limiter = limiter(1, 60);

        assert!(limiter.try_acquire(t0).is_ok());

        let rejected = limiter.try_acquire(t0 + Duration::seconds(30)).unwrap_err();
        assert_eq!(rejected.remaining_secs, 30);

        assert!(limiter.try_acquire(t0 + Duration::seconds(61)).is_ok());
    }

    #[test]
    fn entry_expires_exactly_at_cooldown() {
        let t0 = fixed_now();
        let mut limiter = limiter(1, 60);
        limiter.try_acquire(t0).unwrap();

        assert!(!limiter.has_capacity(t0 + Duration::seconds(59)));
        assert!(limiter.has_capacity(t0 + Duration::seconds(60)));
    }

    #[test]
    fn remaining_wait_rounds_down() {
        let t0 = fixed_now();
        let mut limiter = limiter(1, 60);
        limiter.try_acquire(t0).unwrap();

        let rejected = limiter
            .try_acquire(t0 + Duration::milliseconds(30_400))
            .unwrap_err();
        assert_eq!(rejected.remaining_secs, 29);
    }

    #[test]
    fn rejected_attempts_are_not_recorded() {
        let t0 = fixed_now();
        let mut limiter = limiter(1, 60);
        limiter.try_acquire(t0).unwrap();
        let _ = limiter.try_acquire(t0 + Duration::seconds(10));
        let _ = limiter.try_acquire(t0 + Duration::seconds(20));

        assert_eq!(limiter.timestamps().len(), 1);
        assert!(limiter.try_acquire(t0 + Duration::seconds(60)).is_ok());
    }

    #[test]
    fn wait_tracks_oldest_entry_in_window() {
        let t0 = fixed_now();
        let mut limiter = limiter(3, 60);
        limiter.try_acquire(t0).unwrap();
        limiter.try_acquire(t0 + Duration::seconds(10)).unwrap();
        limiter.try_acquire(t0 + Duration::seconds(20)).unwrap();

        let rejected = limiter.try_acquire(t0 + Duration::seconds(25)).unwrap_err();
        assert_eq!(rejected.remaining_secs, 35);

        // The first slot frees at t0+60; the other two are still in the window.
        assert!(limiter.try_acquire(t0 + Duration::seconds(60)).is_ok());
        assert!(limiter.try_acquire(t0 + Duration::seconds(61)).is_err());
    }

    #[test]
    fn never_more_than_max_in_any_window() {
        let t0 = fixed_now();
        let mut limiter = limiter(2, 10);
        let mut accepted = Vec::new();
        for step in 0..100 {
            let now = t0 + Duration::milliseconds(step * 700);
            if limiter.try_acquire(now).is_ok() {
                accepted.push(now);
            }
        }

        for (idx, start) in accepted.iter().enumerate() {
            let in_window = accepted[idx..]
                .iter()
                .take_while(|stamp| **stamp - *start < Duration::seconds(10))
                .count();
            assert!(in_window <= 2, "window starting at {start} held {in_window}");
        }
    }

    #[test]
    fn clock_stepping_backwards_caps_wait() {
        let t0 = fixed_now();
        let mut limiter = limiter(1, 60);
        limiter.try_acquire(t0).unwrap();

        let rejected = limiter.try_acquire(t0 - Duration::seconds(30)).unwrap_err();
        assert_eq!(rejected.remaining_secs, 60);
    }
}

//! Per-subject attempt rate limiting.
//!
//! There is no persisted "blocked" state: blocking is recomputed on every
//! attempt from the counter/timestamp pair.

use chrono::{DateTime, Utc};

/// Rate limiter thresholds.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Attempts allowed before "too many attempts" within one window
    pub max_attempts: u32,
    /// Minimum spacing between attempts in milliseconds
    pub min_interval_ms: i64,
    /// Counter resets once more than this has elapsed since the last
    /// accepted attempt, in milliseconds
    pub window_reset_ms: i64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            min_interval_ms: 30_000,
            window_reset_ms: 3_600_000,
        }
    }
}

/// Mutable rate limiter state for one subject.
#[derive(Debug, Clone, Default)]
pub struct RateLimiterState {
    /// Attempts recorded in the current window, rejected ones included
    pub attempt_count: u32,
    /// Timestamp of the last accepted attempt
    pub last_attempt_at: Option<DateTime<Utc>>,
}

/// Why an attempt was rate limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitReason {
    /// The attempt budget for the current window is exhausted.
    TooManyAttempts,
    /// The attempt came before the minimum spacing elapsed.
    TooSoon,
}

impl std::fmt::Display for RateLimitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RateLimitReason::TooManyAttempts => "too many attempts",
            RateLimitReason::TooSoon => "too soon",
        };
        write!(f, "{}", reason)
    }
}

/// Outcome of a rate limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The attempt may proceed.
    Accepted,
    /// The attempt is rejected; the caller must wait.
    Rejected(RateLimitReason),
}

/// Guard that meters check-in attempts per subject.
#[derive(Debug, Clone, Default)]
pub struct RateLimiter {
    config: RateLimiterConfig,
}

impl RateLimiter {
    /// Create a limiter with the given thresholds.
    pub fn new(config: RateLimiterConfig) -> Self {
        Self { config }
    }

    /// Evaluate one attempt at `now`, mutating `state` either way.
    ///
    /// Every attempt is counted; `last_attempt_at` is stamped only on
    /// acceptance so a burst of early taps cannot extend its own block
    /// window indefinitely.
    pub fn check(&self, state: &mut RateLimiterState, now: DateTime<Utc>) -> RateDecision {
        let elapsed_ms = state
            .last_attempt_at
            .map(|last| (now - last).num_milliseconds());

        if let Some(elapsed) = elapsed_ms {
            if elapsed > self.config.window_reset_ms {
                state.attempt_count = 0;
            }
        }

        if state.attempt_count >= self.config.max_attempts {
            state.attempt_count += 1;
            return RateDecision::Rejected(RateLimitReason::TooManyAttempts);
        }

        if let Some(elapsed) = elapsed_ms {
            if elapsed < self.config.min_interval_ms {
                state.attempt_count += 1;
                return RateDecision::Rejected(RateLimitReason::TooSoon);
            }
        }

        state.attempt_count += 1;
        state.last_attempt_at = Some(now);
        RateDecision::Accepted
    }
}

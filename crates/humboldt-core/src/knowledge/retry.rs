//! Bounded retry with exponential backoff for knowledge-base calls.
//!
//! Stateless: all logic is in associated functions that take the
//! [`RetryConfig`] as a parameter. With the default `max_attempts = 1` no
//! retry ever happens and errors surface immediately.

use std::time::Duration;

use humboldt_types::config::RetryConfig;
use humboldt_types::error::RemoteServiceError;

pub struct RetryHandler;

impl RetryHandler {
    /// Whether a failed attempt should be retried.
    ///
    /// `attempt` is 1-based (the first call is attempt 1). Only transient
    /// errors are retried.
    pub fn should_retry(config: &RetryConfig, attempt: u32, error: &RemoteServiceError) -> bool {
        attempt < config.max_attempts && error.is_transient()
    }

    /// Delay before the attempt following `attempt`.
    ///
    /// Doubles from `initial_backoff_ms` and is capped at `max_backoff_ms`.
    pub fn backoff(config: &RetryConfig, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let delay = config
            .initial_backoff_ms
            .saturating_mul(1u64 << exponent)
            .min(config.max_backoff_ms);
        Duration::from_millis(delay)
    }
}

//! Exponential backoff for rate-limited (HTTP 429) responses.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each 429.
    pub multiplier: f64,
    /// Retries after the first attempt before giving up.
    pub max_retries: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            max_retries: 3,
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
///
/// The result is clamped to [`BackoffConfig::max_delay`].
pub fn next_delay(current: Duration, config: &BackoffConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// How long to wait before retrying a 429.
///
/// A numeric `Retry-After` wins when it asks for longer than the computed
/// backoff. The result never exceeds `max_delay`.
pub fn retry_wait(headers: &HeaderMap, current: Duration, config: &BackoffConfig) -> Duration {
    let requested = headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs);

    requested
        .map_or(current, |requested| requested.max(current))
        .min(config.max_delay)
}

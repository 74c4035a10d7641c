//! Bounded retry policy for bulk requests.

use std::time::Duration;

use tokio_retry::strategy::jitter;

/// How often and how patiently a failed batch is resubmitted.
///
/// `max_attempts` counts the first submission, so a policy with
/// `max_attempts = 1` never retries. Delays start at `initial_delay` and grow
/// by `multiplier` after each failure, capped at `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub multiplier: u32,
    pub max_delay: Duration,
    /// Scale each delay by a random factor in `[0, 1)`.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(5),
            multiplier: 2,
            max_delay: Duration::from_secs(60),
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// A policy that waits the same delay between every attempt.
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay: delay,
            multiplier: 1,
            max_delay: delay,
            jitter: false,
        }
    }

    /// A policy that makes a single attempt.
    pub fn no_retry() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// The delays slept before each retry, `max_attempts - 1` of them.
    pub fn delays(&self) -> Vec<Duration> {
        (0..self.max_attempts.saturating_sub(1))
            .map(|retry| {
                let exponent = u32::try_from(retry).unwrap_or(u32::MAX);
                let delay = self
                    .initial_delay
                    .saturating_mul(self.multiplier.saturating_pow(exponent))
                    .min(self.max_delay);
                if self.jitter {
                    jitter(delay)
                } else {
                    delay
                }
            })
            .collect()
    }
}

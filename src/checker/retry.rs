//! Retry controller with exponential backoff and jitter
//!
//! A link gets `1 + max_retries` attempts. The first ok attempt ends the
//! loop; otherwise the outcome of the last attempt is kept.
//!
//! # Delay Calculation
//!
//! ```text
//! delay(attempt) = backoff_base * 2^attempt + uniform(0..jitter)
//! ```
//!
//! With defaults the waits are roughly 750-999ms, then 1500-1749ms. The
//! jitter keeps many concurrent links from retrying in lockstep.

use crate::checker::attempt::check_once;
use crate::checker::probe::{Probe, ProbeOutcome};
use crate::config::{CheckerConfig, DEFAULT_BACKOFF_BASE_MS, DEFAULT_JITTER_MS, DEFAULT_RETRIES};
use rand::Rng;
use std::time::Duration;

/// Retry behavior for a single link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,

    /// Delay before the first retry, doubled for each further retry
    pub backoff_base: Duration,

    /// Exclusive upper bound of the random jitter added to each delay
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RETRIES,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            jitter: Duration::from_millis(DEFAULT_JITTER_MS),
        }
    }
}

impl From<&CheckerConfig> for RetryPolicy {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            max_retries: config.retries,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
            jitter: Duration::from_millis(config.jitter_ms),
        }
    }
}

impl RetryPolicy {
    /// Total attempts made for a link that never succeeds
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Deterministic part of the delay after the 0-indexed `attempt` failed
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor)
    }

    /// Delay to wait after the 0-indexed `attempt` failed, jitter included
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..jitter_ms)
        };
        self.base_delay(attempt)
            .saturating_add(Duration::from_millis(jitter))
    }
}

/// Checks `url` until an attempt is ok or the attempts run out
///
/// Never waits after a successful attempt or after the last attempt, so
/// `max_retries == 0` means exactly one attempt and no sleep.
pub async fn check_with_retries(
    probe: &dyn Probe,
    url: &str,
    timeout: Duration,
    policy: &RetryPolicy,
) -> ProbeOutcome {
    let mut attempt = 0;

    loop {
        let outcome = check_once(probe, url, timeout).await;

        if outcome.ok || attempt >= policy.max_retries {
            return outcome;
        }

        let delay = policy.backoff_delay(attempt);
        tracing::debug!(
            "Attempt {}/{} for {} failed (status {}), retrying in {:?}",
            attempt + 1,
            policy.total_attempts(),
            url,
            outcome.status,
            delay
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

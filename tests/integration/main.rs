//! Integration tests for link-health
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! HTTP probe, the full checking engine and the file collaborators end to end.

mod probe_tests;
mod run_tests;

use link_health::checker::{CheckerSettings, RetryPolicy};
use std::time::Duration;

/// Settings with short waits so failing links retry quickly
pub fn fast_settings() -> CheckerSettings {
    CheckerSettings {
        concurrency: 4,
        timeout: Duration::from_secs(5),
        retry: RetryPolicy {
            max_retries: 2,
            backoff_base: Duration::from_millis(5),
            jitter: Duration::from_millis(5),
        },
    }
}

//! One check attempt with HEAD→GET fallback
//!
//! HEAD is tried first because it skips the body. Many servers reject or
//! mishandle HEAD, so anything short of a clean success is re-checked with GET
//! before the attempt is counted as failed.

use crate::checker::probe::{Probe, ProbeOutcome};
use reqwest::Method;
use std::time::Duration;

/// Status some servers return when they do not implement HEAD
const METHOD_NOT_ALLOWED: u16 = 405;

/// Returns true if a HEAD response should be re-checked with GET
///
/// The conditions are evaluated independently: a non-ok response, any
/// status >= 400, or exactly 405. A HEAD transport error always falls back.
fn needs_get_fallback(outcome: &ProbeOutcome) -> bool {
    !outcome.ok || outcome.status >= 400 || outcome.status == METHOD_NOT_ALLOWED
}

/// Runs a single check attempt against `url`
///
/// # Flow
///
/// 1. HEAD; a transport error just means "no usable response"
/// 2. On any fallback condition, GET; a GET transport error becomes
///    `{ ok: false, status: 0, err: <message> }`, otherwise the GET outcome
///    is returned verbatim
/// 3. Otherwise the HEAD outcome is returned verbatim
pub async fn check_once(probe: &dyn Probe, url: &str, timeout: Duration) -> ProbeOutcome {
    match probe.probe(url, Method::HEAD, timeout).await {
        Ok(outcome) if !needs_get_fallback(&outcome) => return outcome,
        Ok(outcome) => {
            tracing::debug!("HEAD {} returned {}, retrying with GET", url, outcome.status)
        }
        Err(e) => tracing::debug!("HEAD {} failed ({}), retrying with GET", url, e),
    }

    match probe.probe(url, Method::GET, timeout).await {
        Ok(outcome) => outcome,
        Err(e) => ProbeOutcome::unreachable(e.to_string()),
    }
}

//! Checker module for link reachability probing
//!
//! This module contains the core checking logic, including:
//! - Single HTTP probes with a hard deadline
//! - HEAD→GET fallback within one attempt
//! - Retries with exponential backoff and jitter
//! - Bounded-concurrency scheduling across many links

mod attempt;
mod engine;
mod pool;
mod probe;
mod retry;


pub use attempt::check_once;
pub use engine::{dedup_preserving_order, CheckerSettings, LinkChecker};
pub use pool::run_pool;
pub use probe::{
    build_http_client, HttpProbe, Probe, ProbeOutcome, TransportError, ACCEPT_HEADER,
    ACCEPT_LANGUAGE_HEADER,
};
pub use retry::{check_with_retries, RetryPolicy};

use crate::config::Config;
use crate::report::HealthReport;

/// Checks a list of URLs over HTTP and returns the health report
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client from the user agent configuration
/// 2. Check each distinct URL with retries, `concurrency` at a time
/// 3. Assemble the report once every URL has a final outcome
///
/// # Returns
///
/// * `Ok(HealthReport)` - One entry per distinct URL
/// * `Err(LinkHealthError)` - The HTTP client could not be built
pub async fn check_links(config: &Config, urls: &[String]) -> crate::Result<HealthReport> {
    let checker = LinkChecker::from_config(config)?;
    Ok(checker.run(urls).await)
}

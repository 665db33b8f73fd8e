//! Link checking engine
//!
//! This module ties the checking layers together:
//! - The probe performs single HTTP requests
//! - Each attempt tries HEAD, then GET on any sign of trouble
//! - The retry policy repeats failed attempts with backoff
//! - The pool runs many links at once with a fixed bound
//! - The report collects the final outcome of every link

use crate::checker::attempt::check_once;
use crate::checker::pool::run_pool;
use crate::checker::probe::{HttpProbe, Probe, ProbeOutcome};
use crate::checker::retry::{check_with_retries, RetryPolicy};
use crate::config::{CheckerConfig, Config, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_MS};
use crate::report::{HealthReport, UrlResult};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runtime settings of the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerSettings {
    /// Maximum number of links checked at the same time
    pub concurrency: usize,

    /// Hard deadline of each probe, identical for every retry
    pub timeout: Duration,

    /// Retry and backoff behavior
    pub retry: RetryPolicy,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry: RetryPolicy::default(),
        }
    }
}

impl From<&CheckerConfig> for CheckerSettings {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            timeout: Duration::from_millis(config.timeout_ms),
            retry: RetryPolicy::from(config),
        }
    }
}

/// The link checker
pub struct LinkChecker {
    probe: Arc<dyn Probe>,
    settings: CheckerSettings,
}

impl LinkChecker {
    /// Creates a checker around any probe implementation
    pub fn new(probe: Arc<dyn Probe>, settings: CheckerSettings) -> Self {
        Self { probe, settings }
    }

    /// Creates a checker that probes over HTTP with the configured settings
    ///
    /// # Returns
    ///
    /// * `Ok(LinkChecker)` - Ready to run
    /// * `Err(reqwest::Error)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let probe = HttpProbe::new(&config.user_agent)?;
        Ok(Self::new(
            Arc::new(probe),
            CheckerSettings::from(&config.checker),
        ))
    }

    /// One attempt with HEAD→GET fallback, no retries
    pub async fn check_once(&self, url: &str) -> ProbeOutcome {
        check_once(self.probe.as_ref(), url, self.settings.timeout).await
    }

    /// Full check of one link with retries and backoff
    pub async fn check_with_retries(&self, url: &str) -> UrlResult {
        let outcome = check_with_retries(
            self.probe.as_ref(),
            url,
            self.settings.timeout,
            &self.settings.retry,
        )
        .await;

        if outcome.ok {
            tracing::trace!("{} ok ({})", url, outcome.status);
        } else if outcome.status == 0 {
            tracing::warn!("{} unreachable: {}", url, outcome.error);
        } else {
            tracing::warn!("{} failed with status {}", url, outcome.status);
        }

        outcome
    }

    /// Checks every URL through the bounded pool
    ///
    /// Returns `(url, result)` pairs in input order.
    pub async fn check_all(&self, urls: &[String]) -> Vec<(String, UrlResult)> {
        run_pool(urls, self.settings.concurrency, |url| {
            let url = url.clone();
            async move {
                let result = self.check_with_retries(&url).await;
                (url, result)
            }
        })
        .await
    }

    /// Runs a complete check and assembles the report
    ///
    /// Duplicate URLs are checked once; every distinct input URL appears
    /// exactly once in the report. The timestamp is taken after the last
    /// link finished.
    pub async fn run(&self, urls: &[String]) -> HealthReport {
        let unique = dedup_preserving_order(urls);
        if unique.len() < urls.len() {
            tracing::debug!("Skipping {} duplicate URL(s)", urls.len() - unique.len());
        }

        tracing::info!(
            "Checking {} link(s) with concurrency {}",
            unique.len(),
            self.settings.concurrency
        );
        let start_time = Instant::now();

        let pairs = self.check_all(&unique).await;
        let report = HealthReport::assemble(pairs);

        let stats = report.stats();
        tracing::info!(
            "Checked {} link(s) in {:.2}s: {} ok, {} failed",
            stats.total,
            start_time.elapsed().as_secs_f64(),
            stats.ok,
            stats.failed
        );

        report
    }
}

/// Removes repeated URLs, keeping the first occurrence of each
pub fn dedup_preserving_order(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(urls.len());
    for url in urls {
        if seen.insert(url.as_str()) {
            unique.push(url.clone());
        }
    }
    unique
}

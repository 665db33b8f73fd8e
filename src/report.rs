//! Health report assembly
//!
//! The report is the only artifact of a run: a timestamp plus one entry per
//! checked URL. It is built once, after every link has a final outcome, and
//! is never mutated afterwards.

use crate::checker::ProbeOutcome;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Final outcome of a link after all its attempts
pub type UrlResult = ProbeOutcome;

/// Machine-readable health report for one run
///
/// Serializes as `{ "updatedAt": "...", "results": { "<url>": { "ok", "status", "err" } } }`.
/// Results are keyed by URL in a `BTreeMap`, so the output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Completion time of the run
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,

    /// Final outcome per URL
    pub results: BTreeMap<String, UrlResult>,
}

/// Counts derived from a report, used for logging and summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
    /// Failed without any HTTP response (status 0)
    pub unreachable: usize,
}

impl HealthReport {
    /// Folds `(url, result)` pairs into a report stamped with the current time
    ///
    /// A duplicated URL keeps the last result supplied for it.
    pub fn assemble<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, UrlResult)>,
    {
        let updated_at = Utc::now();
        let results = pairs.into_iter().collect();
        Self {
            updated_at,
            results,
        }
    }

    /// Computes totals over all results
    pub fn stats(&self) -> ReportStats {
        self.results
            .values()
            .fold(ReportStats::default(), |mut stats, result| {
                stats.total += 1;
                if result.ok {
                    stats.ok += 1;
                } else {
                    stats.failed += 1;
                    if result.status == 0 {
                        stats.unreachable += 1;
                    }
                }
                stats
            })
    }

    /// Iterates over the URLs that did not pass, in key order
    pub fn failing(&self) -> impl Iterator<Item = (&String, &UrlResult)> {
        self.results.iter().filter(|(_, result)| !result.ok)
    }

    /// The timestamp in its serialized form
    pub fn updated_at_string(&self) -> String {
        format_timestamp(&self.updated_at)
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(timestamp))
}

//! Output module for persisting health reports
//!
//! This module handles:
//! - Writing the JSON health report atomically
//! - Generating the optional markdown summary
//! - Logging run statistics

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::{read_report, JsonFileSink};
pub use markdown::{format_markdown_summary, MarkdownSummarySink};
pub use stats::{log_statistics, print_statistics};
pub use traits::{OutputError, OutputResult, ReportSink};

use crate::config::OutputConfig;
use crate::report::HealthReport;

/// Builds the sinks selected by the output configuration
///
/// The markdown summary, when configured, comes first and the JSON report
/// last. A failed summary therefore leaves the previous JSON report in place.
pub fn sinks_from_config(config: &OutputConfig) -> Vec<Box<dyn ReportSink>> {
    let mut sinks: Vec<Box<dyn ReportSink>> = Vec::with_capacity(2);
    if let Some(summary_path) = &config.summary_path {
        sinks.push(Box::new(MarkdownSummarySink::new(summary_path)));
    }
    sinks.push(Box::new(JsonFileSink::new(&config.path)));
    sinks
}

/// Hands the report to every sink in order, stopping at the first failure
pub fn write_report(report: &HealthReport, sinks: &[Box<dyn ReportSink>]) -> OutputResult<()> {
    for sink in sinks {
        sink.write(report)?;
        tracing::info!("Wrote report to {}", sink.describe());
    }
    Ok(())
}

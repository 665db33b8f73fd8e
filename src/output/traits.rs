//! Report sink trait and error types
//!
//! This module defines the interface the run hands its finished report to.

use crate::report::HealthReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a finished health report
///
/// A sink either persists the whole report or fails; a partially written
/// report is never considered valid.
pub trait ReportSink {
    /// Persists the report, replacing any previous one
    fn write(&self, report: &HealthReport) -> OutputResult<()>;

    /// Short description of where the report goes, for logging
    fn describe(&self) -> String;
}

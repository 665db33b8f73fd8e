//! link-health: a scheduled reachability checker for curated link directories
//!
//! This crate probes every link of a directory with bounded concurrency,
//! HEAD→GET fallback and retries with exponential backoff, and writes the
//! outcome as a machine-readable health report.

pub mod checker;
pub mod config;
pub mod output;
pub mod report;
pub mod source;

use thiserror::Error;

/// Main error type for link-health operations
///
/// Only collaborator failures (config, input, output, client setup) end up
/// here. A URL that cannot be reached is recorded in the report instead.
#[derive(Debug, Error)]
pub enum LinkHealthError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Link source error: {0}")]
    Source(#[from] source::SourceError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for link-health operations
pub type Result<T> = std::result::Result<T, LinkHealthError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{CheckerSettings, HttpProbe, LinkChecker, Probe, ProbeOutcome, TransportError};
pub use config::Config;
pub use report::{HealthReport, ReportStats, UrlResult};

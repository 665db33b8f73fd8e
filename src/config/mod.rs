//! Configuration module for link-health
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a run without a config file checks links with
//! the standard settings.
//!
//! # Example
//!
//! ```no_run
//! use link_health::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-health.toml")).unwrap();
//! println!("Checking with concurrency {}", config.checker.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CheckerConfig, Config, InputConfig, OutputConfig, UserAgentConfig, DEFAULT_BACKOFF_BASE_MS,
    DEFAULT_CONCURRENCY, DEFAULT_JITTER_MS, DEFAULT_RETRIES, DEFAULT_TIMEOUT_MS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

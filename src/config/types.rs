use serde::Deserialize;

/// Default number of links probed at the same time
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default per-attempt timeout (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Default number of retries after the first attempt
pub const DEFAULT_RETRIES: u32 = 2;

/// Default base delay for exponential backoff (milliseconds)
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 750;

/// Default upper bound (exclusive) of the random jitter (milliseconds)
pub const DEFAULT_JITTER_MS: u64 = 250;

/// Main configuration structure for link-health
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub checker: CheckerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Link checking behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Maximum number of URLs being checked at the same time
    pub concurrency: usize,

    /// Hard timeout for a single probe (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt (total attempts = 1 + retries)
    pub retries: u32,

    /// Base delay for exponential backoff between attempts (milliseconds)
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,

    /// Random jitter added to each backoff, drawn from `0..jitter-ms`
    #[serde(rename = "jitter-ms")]
    pub jitter_ms: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retries: DEFAULT_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
            jitter_ms: DEFAULT_JITTER_MS,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the checker
    pub name: String,

    /// Version of the checker
    pub version: String,

    /// URL with information about the checker
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "link-health".to_string(),
            version: "1.0".to_string(),
            contact_url: "https://github.com/knlmagic/doi-link-hub".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!("{}/{} (+{})", self.name, self.version, self.contact_url)
    }
}

/// Where the link directory is read from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the JSON link directory
    pub path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "assets/statePortals.json".to_string(),
        }
    }
}

/// Where the health report is written
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON health report
    pub path: String,

    /// Optional path to a markdown summary of failing links
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "assets/health.json".to_string(),
            summary_path: None,
        }
    }
}

//! Single-attempt HTTP probe
//!
//! This module handles the one network operation the checker performs:
//! - Building the HTTP client with the identifying headers
//! - Issuing exactly one request with a given method
//! - Enforcing a hard per-attempt deadline
//! - Classifying transport failures
//!
//! Retries and method fallback live one level up.

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// `accept` header sent with every probe, preferring HTML/XML
pub const ACCEPT_HEADER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// `accept-language` header sent with every probe
pub const ACCEPT_LANGUAGE_HEADER: &str = "en-US,en;q=0.9";

/// Outcome of a probe, or of a whole link check
///
/// `status` is 0 when no response was received; `error` is empty unless the
/// check ended without a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Whether the response status was in the 2xx range
    pub ok: bool,

    /// Numeric HTTP status code, 0 for no response
    pub status: u16,

    /// Transport error text, empty if a response arrived
    #[serde(rename = "err")]
    pub error: String,
}

impl ProbeOutcome {
    /// Builds an outcome from a received HTTP status
    pub fn from_status(status: u16) -> Self {
        Self {
            ok: (200..300).contains(&status),
            status,
            error: String::new(),
        }
    }

    /// Builds the outcome recorded when no response could be obtained
    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: 0,
            error: error.into(),
        }
    }
}

/// Timeout or network-level failure of a single probe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response arrived before the deadline; the request was dropped
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// Connection, DNS, TLS or request-building failure
    #[error("{message}")]
    Network { url: String, message: String },
}

/// A single bounded-time HTTP attempt
///
/// Implementations must not retry or fall back to another method; each call
/// is exactly one request. Every call carries its own deadline, so one
/// attempt timing out never affects other in-flight attempts.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Sends one `method` request to `url`, giving up after `timeout`
    async fn probe(
        &self,
        url: &str,
        method: Method,
        timeout: Duration,
    ) -> Result<ProbeOutcome, TransportError>;
}

/// Builds an HTTP client with the checker's identifying headers
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use link_health::checker::build_http_client;
/// use link_health::config::UserAgentConfig;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_HEADER));

    // Redirects follow the transport default; the deadline is applied per probe
    Client::builder()
        .user_agent(config.header_value())
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`Probe`]
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Creates a probe with a freshly built client
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(
        &self,
        url: &str,
        method: Method,
        timeout: Duration,
    ) -> Result<ProbeOutcome, TransportError> {
        let request = self.client.request(method.clone(), url).send();

        // Dropping the send future on expiry aborts the in-flight request
        match tokio::time::timeout(timeout, request).await {
            Ok(Ok(response)) => {
                let status = response.status();
                tracing::trace!("{} {} -> {}", method, url, status.as_u16());
                Ok(ProbeOutcome {
                    ok: status.is_success(),
                    status: status.as_u16(),
                    error: String::new(),
                })
            }
            Ok(Err(e)) => Err(classify_error(url, e, timeout)),
            Err(_) => {
                tracing::trace!("{} {} timed out after {:?}", method, url, timeout);
                Err(TransportError::Timeout {
                    url: url.to_string(),
                    timeout_ms: duration_ms(timeout),
                })
            }
        }
    }
}

/// Maps a reqwest error onto the transport taxonomy
fn classify_error(url: &str, error: reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
            timeout_ms: duration_ms(timeout),
        }
    } else {
        TransportError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

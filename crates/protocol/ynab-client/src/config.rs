//! Client configuration.

use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.ynab.com/v1";

/// Default per-attempt HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry behaviour for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial attempt)
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub base_delay: Duration,
    /// Upper bound for a single backoff
    pub max_delay: Duration,
    /// Apply +-25% jitter to each backoff
    pub jitter: bool,
    /// Treat 5xx responses as transient
    pub retry_server_errors: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
            jitter: false,
            retry_server_errors: false,
        }
    }
}

impl RetryConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if self.max_attempts == 0 {
            return Err(ClientError::validation("max_attempts must be at least 1"));
        }
        if self.max_delay < self.base_delay {
            return Err(ClientError::validation(
                "max_delay must not be smaller than base_delay",
            ));
        }
        Ok(())
    }
}

/// Settings for [`crate::YnabClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upstream base URL without trailing slash
    pub base_url: String,
    /// Per-attempt HTTP timeout
    pub timeout: Duration,
    /// Retry policy
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a different base URL, e.g. a local mock.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Replace the retry settings.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::validation("base_url must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::validation("timeout must be greater than zero"));
        }
        self.retry.validate()
    }
}

//! Retry logic with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::error::{ClientError, ClientResult};

/// Retry policy with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt)
    max_attempts: u32,
    /// Base delay between retries
    base_delay: Duration,
    /// Maximum delay between retries
    max_delay: Duration,
    /// Apply +-25% jitter
    jitter: bool,
    /// Retry 5xx responses
    retry_server_errors: bool,
}

impl RetryPolicy {
    /// Create a new retry policy without jitter.
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            jitter: false,
            retry_server_errors: false,
        }
    }

    /// Create from retry config.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.base_delay,
            max_delay: config.max_delay,
            jitter: config.jitter,
            retry_server_errors: config.retry_server_errors,
        }
    }

    /// Enable or disable jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Treat 5xx responses as transient.
    pub fn with_server_error_retry(mut self, enabled: bool) -> Self {
        self.retry_server_errors = enabled;
        self
    }

    /// Calculate the delay before a given attempt (0-indexed).
    ///
    /// Attempt 0 runs immediately; attempt `n` waits `base_delay * 2^(n-1)`,
    /// capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let multiplier = 2u32.saturating_pow(attempt - 1);
        let base = self.base_delay.saturating_mul(multiplier);
        let capped = std::cmp::min(base, self.max_delay);

        if !self.jitter {
            return capped;
        }

        let jitter_range = capped.as_millis() as u64 / 4;
        if jitter_range == 0 {
            return capped;
        }
        let jitter = rand::random::<u64>() % (jitter_range * 2);
        let jittered_ms = (capped.as_millis() as u64)
            .saturating_sub(jitter_range)
            .saturating_add(jitter);
        Duration::from_millis(jittered_ms)
    }

    /// Execute an async operation with retry logic.
    ///
    /// Terminal errors return immediately. When the last attempt fails with a
    /// transient error it is wrapped in [`ClientError::RetriesExhausted`].
    /// A backoff aborts with [`ClientError::Cancelled`] as soon as `cancel`
    /// fires.
    pub async fn execute<F, Fut, T>(
        &self,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> ClientResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut attempt = 0;
        loop {
            let delay = self.delay_for_attempt(attempt);
            if !delay.is_zero() {
                debug!(attempt, backoff = ?delay, "Retrying after delay");
                tokio::select! {
                    _ = sleep(delay) => {}
                    _ = cancel.cancelled() => {
                        debug!(attempt, "Backoff cancelled");
                        return Err(ClientError::Cancelled);
                    }
                }
            }

            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if !e.is_retryable(self.retry_server_errors) => return Err(e),
                Err(e) if attempt + 1 >= self.max_attempts => {
                    warn!(
                        attempts = attempt + 1,
                        error = %e,
                        "Retries exhausted"
                    );
                    return Err(ClientError::RetriesExhausted {
                        attempts: attempt + 1,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Retryable error, will retry"
                    );
                }
            }
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

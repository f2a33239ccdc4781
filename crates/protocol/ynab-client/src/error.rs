//! Error types for the upstream client.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, timeout or body-read failure (retryable).
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP 429 (retryable).
    #[error("rate limited by upstream (429)")]
    RateLimited,

    /// Any other 4xx response.
    #[error("{}", describe_status(.status, .detail))]
    Api {
        /// HTTP status
        status: u16,
        /// `error.detail` from the response body, if present
        detail: Option<String>,
    },

    /// 5xx response.
    #[error("upstream server error {}", describe_status(.status, .detail))]
    Server {
        /// HTTP status
        status: u16,
        /// `error.detail` from the response body, if present
        detail: Option<String>,
    },

    /// Lookup by ID found nothing in the fetched list.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `account`
        kind: &'static str,
        /// The missing ID
        id: String,
    },

    /// Invalid local input; never sent upstream.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Every attempt failed with a transient error.
    #[error("giving up after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The last transient error
        #[source]
        source: Box<ClientError>,
    },

    /// A pending backoff was interrupted by shutdown.
    #[error("request cancelled")]
    Cancelled,

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn describe_status(status: &u16, detail: &Option<String>) -> String {
    match detail.as_deref() {
        Some(detail) if !detail.is_empty() => format!("{}: {}", status, detail),
        _ => format!("status {}", status),
    }
}

impl ClientError {
    /// Create a new Transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a new Validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new Decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Classify a non-success HTTP response.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            429 => Self::RateLimited,
            500..=599 => Self::Server { status, detail },
            _ => Self::Api { status, detail },
        }
    }

    /// Check if this error is retryable.
    ///
    /// 5xx responses count only when `retry_server_errors` is set.
    pub fn is_retryable(&self, retry_server_errors: bool) -> bool {
        match self {
            Self::Transport(_) | Self::RateLimited => true,
            Self::Server { .. } => retry_server_errors,
            _ => false,
        }
    }

    /// The innermost error, looking through `RetriesExhausted`.
    pub fn root(&self) -> &ClientError {
        match self {
            Self::RetriesExhausted { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::RateLimited => Some(429),
            Self::Api { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

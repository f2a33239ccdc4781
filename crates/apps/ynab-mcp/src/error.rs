//! Error types for the MCP tool server.
//!
//! Tool failures are reported to the assistant as error results, never as
//! protocol failures. Each error maps to a stable [`ErrorCode`] with a
//! recovery hint so the assistant can decide whether to retry, fix its
//! input or give up.

use thiserror::Error;
use ynab_client::ClientError;
use ynab_insights::InsightsError;

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Stable error codes reported in tool error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Input Errors (0x0001 - 0x00FF)
    // =========================================================================
    /// A parameter is missing or malformed
    InvalidInput = 0x0001,
    /// The referenced budget, account, category, payee or transaction does not exist
    NotFound = 0x0002,

    // =========================================================================
    // Upstream Errors (0x0100 - 0x01FF)
    // =========================================================================
    /// The access token was rejected
    Unauthorized = 0x0100,
    /// Upstream rejected the request
    UpstreamError = 0x0101,
    /// Upstream rate limit still exceeded after retries
    RateLimited = 0x0102,
    /// Upstream returned a server error
    UpstreamUnavailable = 0x0103,
    /// Upstream could not be reached
    NetworkError = 0x0104,
    /// Upstream answered with an unexpected body
    UnexpectedResponse = 0x0105,

    // =========================================================================
    // Server Errors (0x0200 - 0x02FF)
    // =========================================================================
    /// The server is shutting down
    Cancelled = 0x0200,
    /// Unexpected local failure
    InternalError = 0x0201,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Snake-case name used in the `error` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::UpstreamError => "upstream_error",
            Self::RateLimited => "rate_limited",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::NetworkError => "network_error",
            Self::UnexpectedResponse => "unexpected_response",
            Self::Cancelled => "cancelled",
            Self::InternalError => "internal_error",
        }
    }

    /// Get a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Check the parameter values and formats, then call the tool again.",
            Self::NotFound => "Verify the ID. Use the matching list_* tool to find valid IDs.",
            Self::Unauthorized => "The YNAB access token is invalid or expired. Generate a new one in YNAB developer settings.",
            Self::UpstreamError => "YNAB rejected the request. Review the message and adjust the parameters.",
            Self::RateLimited => "YNAB allows 200 requests per hour per token. Wait a few minutes before retrying.",
            Self::UpstreamUnavailable => "YNAB is having trouble. Try again shortly.",
            Self::NetworkError => "Check network connectivity to api.ynab.com and try again.",
            Self::UnexpectedResponse => "YNAB returned data in an unexpected format. Try again or report the issue.",
            Self::Cancelled => "The server is shutting down. Reconnect and retry.",
            Self::InternalError => "An unexpected error occurred. Check the server logs.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A tool parameter failed validation.
    #[error("{0}")]
    InvalidInput(String),

    /// Upstream call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Date or month input rejected by the aggregation engine.
    #[error(transparent)]
    Insights(#[from] InsightsError),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new invalid-input error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) | Self::Insights(_) => ErrorCode::InvalidInput,
            Self::Serialization(_) => ErrorCode::InternalError,
            Self::Client(e) => ErrorCode::from(e),
        }
    }

    /// Recovery hint; input errors carry a specific one.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Insights(e) => e.suggestion(),
            other => other.error_code().suggestion(),
        }
    }
}

fn client_code(error: &ClientError) -> ErrorCode {
    match error {
        ClientError::Transport(_) => ErrorCode::NetworkError,
        ClientError::RateLimited => ErrorCode::RateLimited,
        ClientError::Api { status: 401, .. } => ErrorCode::Unauthorized,
        ClientError::Api { status: 404, .. } => ErrorCode::NotFound,
        ClientError::Api { .. } => ErrorCode::UpstreamError,
        ClientError::Server { .. } => ErrorCode::UpstreamUnavailable,
        ClientError::NotFound { .. } => ErrorCode::NotFound,
        ClientError::Validation(_) => ErrorCode::InvalidInput,
        ClientError::Cancelled => ErrorCode::Cancelled,
        ClientError::Decode(_) => ErrorCode::UnexpectedResponse,
        ClientError::RetriesExhausted { .. } => ErrorCode::InternalError,
    }
}

impl From<&ClientError> for ErrorCode {
    /// Classify by the innermost cause so exhausted retries report what failed.
    fn from(error: &ClientError) -> Self {
        client_code(error.root())
    }
}

/// Reject a required string parameter that is blank.
pub fn require<'a>(field: &str, value: &'a str) -> ToolResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolError::invalid(format!("{} is required", field)));
    }
    Ok(value)
}

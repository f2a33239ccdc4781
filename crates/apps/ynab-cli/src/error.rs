//! CLI error types.

use thiserror::Error;
use ynab_client::ClientError;
use ynab_mcp::ErrorCode;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error enum wrapping all crate errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Explicit config file does not exist.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// Client construction or upstream error.
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Transport failed while serving.
    #[error("Server error: {0}")]
    Server(String),

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a server error.
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Not found: 2
            Self::ConfigNotFound(_) => 2,
            // Config errors: 3
            Self::Config(_) | Self::Toml(_) => 3,
            // Upstream/client errors: 5
            Self::Client(_) => 5,
            // Transport errors: 8
            Self::Server(_) => 8,
            // IO errors: 9
            Self::Io(_) => 9,
        }
    }

    /// Get the error code shown next to the message.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Config(_) | Self::Toml(_) | Self::ConfigNotFound(_) => ErrorCode::InvalidInput,
            Self::Client(e) => ErrorCode::from(e),
            Self::Server(_) | Self::Io(_) => ErrorCode::InternalError,
        }
    }

    /// Recovery hint printed under the error.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::Toml(_) => {
                "Set YNAB_ACCESS_TOKEN or fix the config file (see `ynab-mcp-server --help`)."
            }
            Self::ConfigNotFound(_) => "Check the --config path or omit it to use the default location.",
            Self::Server(_) => "Check that the port is free and the host address is valid.",
            other => other.error_code().suggestion(),
        }
    }
}

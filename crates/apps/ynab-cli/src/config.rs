//! Server configuration.
//!
//! Values are layered: defaults, then the TOML file, then environment
//! variables, then command-line flags.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ynab_client::{ClientConfig, RetryConfig, DEFAULT_BASE_URL};

use crate::error::{CliError, CliResult};

/// Environment variable names.
pub mod env {
    pub const ACCESS_TOKEN: &str = "YNAB_ACCESS_TOKEN";
    pub const AUTH_TOKEN: &str = "MCP_AUTH_TOKEN";
    pub const TRANSPORT: &str = "YNAB_MCP_TRANSPORT";
    pub const HTTP_PORT: &str = "YNAB_MCP_HTTP_PORT";
    pub const HTTP_HOST: &str = "YNAB_MCP_HTTP_HOST";
    pub const LOG_LEVEL: &str = "YNAB_MCP_LOG_LEVEL";
    pub const BASE_URL: &str = "YNAB_MCP_BASE_URL";
}

/// Expand environment variables in a string.
/// Supports `${VAR_NAME}` syntax; unknown variables are left as written.
fn expand_env_vars(input: &str, lookup: &dyn Fn(&str) -> Option<String>) -> CliResult<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| CliError::config(format!("invalid expansion pattern: {}", e)))?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .to_string())
}

fn expand_opt(
    value: &mut Option<String>,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> CliResult<()> {
    if let Some(v) = value.as_mut() {
        *v = expand_env_vars(v, lookup)?;
    }
    Ok(())
}

/// How the MCP server talks to its client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// Streamable HTTP on `http_host:http_port`.
    Http,
}

impl FromStr for Transport {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => Err(CliError::config(format!(
                "transport must be 'stdio' or 'http', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        })
    }
}

/// Server configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Personal access token for the YNAB API.
    pub ynab_access_token: Option<String>,
    /// Transport to serve on.
    pub transport: Transport,
    /// HTTP bind address.
    pub http_host: String,
    /// HTTP port.
    pub http_port: u16,
    /// Bearer token required on `/mcp` when set.
    pub mcp_auth_token: Option<String>,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Upstream base URL override.
    pub base_url: Option<String>,
    /// Retry and timeout settings.
    pub retry: RetrySection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ynab_access_token: None,
            transport: Transport::Stdio,
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            mcp_auth_token: None,
            log_level: "info".to_string(),
            base_url: None,
            retry: RetrySection::default(),
        }
    }
}

/// `[retry]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySection {
    /// Attempts per call, including the first.
    pub max_attempts: u32,
    /// First backoff in milliseconds; doubles per retry.
    pub base_delay_ms: u64,
    /// Backoff cap in milliseconds.
    pub max_delay_ms: u64,
    /// Per-attempt HTTP timeout.
    pub timeout_secs: u64,
    pub jitter: bool,
    /// Retry 5xx responses as well as 429 and transport failures.
    pub retry_server_errors: bool,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 8000,
            timeout_secs: 30,
            jitter: false,
            retry_server_errors: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a file; a missing file yields defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.expand_with(&|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load the file at `explicit`, which must exist, or the default location.
    pub fn load_from(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) if !path.exists() => {
                Err(CliError::ConfigNotFound(path.display().to_string()))
            }
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Expand `${VAR}` references in string values.
    fn expand_with(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> CliResult<()> {
        expand_opt(&mut self.ynab_access_token, lookup)?;
        expand_opt(&mut self.mcp_auth_token, lookup)?;
        expand_opt(&mut self.base_url, lookup)?;
        self.http_host = expand_env_vars(&self.http_host, lookup)?;
        self.log_level = expand_env_vars(&self.log_level, lookup)?;
        Ok(())
    }

    /// Apply the process environment on top of the file values.
    pub fn apply_env(&mut self) -> CliResult<()> {
        self.apply_env_from(&|name| std::env::var(name).ok())
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env_from(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> CliResult<()> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(env::ACCESS_TOKEN) {
            self.ynab_access_token = Some(token);
        }
        if let Some(token) = get(env::AUTH_TOKEN) {
            self.mcp_auth_token = Some(token);
        }
        if let Some(transport) = get(env::TRANSPORT) {
            self.transport = transport.parse()?;
        }
        if let Some(port) = get(env::HTTP_PORT) {
            self.http_port = port.trim().parse().map_err(|_| {
                CliError::config(format!("{} must be a port number, got '{}'", env::HTTP_PORT, port))
            })?;
        }
        if let Some(host) = get(env::HTTP_HOST) {
            self.http_host = host;
        }
        if let Some(level) = get(env::LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(url) = get(env::BASE_URL) {
            self.base_url = Some(url);
        }
        Ok(())
    }

    /// Apply command-line flags, which win over everything else.
    pub fn apply_overrides(
        &mut self,
        transport: Option<Transport>,
        port: Option<u16>,
        host: Option<String>,
    ) {
        if let Some(transport) = transport {
            self.transport = transport;
        }
        if let Some(port) = port {
            self.http_port = port;
        }
        if let Some(host) = host {
            self.http_host = host;
        }
    }

    /// Check the settings needed to start serving.
    pub fn validate(&self) -> CliResult<()> {
        self.access_token()?;
        if self.retry.max_attempts == 0 {
            return Err(CliError::config("retry.max_attempts must be at least 1"));
        }
        if self.retry.timeout_secs == 0 {
            return Err(CliError::config("retry.timeout_secs must be at least 1"));
        }
        if self.retry.max_delay_ms < self.retry.base_delay_ms {
            return Err(CliError::config(
                "retry.max_delay_ms must not be smaller than retry.base_delay_ms",
            ));
        }
        if self.transport == Transport::Http && self.http_host.trim().is_empty() {
            return Err(CliError::config("http_host must not be empty"));
        }
        Ok(())
    }

    /// The upstream access token.
    pub fn access_token(&self) -> CliResult<&str> {
        self.ynab_access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                CliError::config(format!(
                    "{} is required (or set ynab_access_token in the config file)",
                    env::ACCESS_TOKEN
                ))
            })
    }

    /// Client settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self
                .base_url
                .as_deref()
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(self.retry.timeout_secs),
            retry: RetryConfig {
                max_attempts: self.retry.max_attempts,
                base_delay: Duration::from_millis(self.retry.base_delay_ms),
                max_delay: Duration::from_millis(self.retry.max_delay_ms),
                jitter: self.retry.jitter,
                retry_server_errors: self.retry.retry_server_errors,
            },
        }
    }
}

/// Get the default config file path, `<config_dir>/ynab-mcp/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("ynab-mcp").join("config.toml"))
}

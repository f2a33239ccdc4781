//! Command-line launcher for the YNAB MCP server.
//!
//! This crate provides the `ynab-mcp-server` binary.
//!
//! # Quick Start
//!
//! ```bash
//! # Serve on stdio for a desktop MCP client
//! YNAB_ACCESS_TOKEN=... ynab-mcp-server
//!
//! # Serve streamable HTTP with bearer auth
//! YNAB_ACCESS_TOKEN=... MCP_AUTH_TOKEN=... ynab-mcp-server serve --transport http --port 8080
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from `<config_dir>/ynab-mcp/config.toml`
//! (override with `--config`), then overridden by `YNAB_*` / `MCP_*`
//! environment variables, then by command-line flags. String values may
//! reference environment variables as `${VAR}`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod signals;

// Re-export main types
pub use cli::{Cli, Commands, TransportArg};
pub use config::{ServerConfig, Transport};
pub use error::{CliError, CliResult};

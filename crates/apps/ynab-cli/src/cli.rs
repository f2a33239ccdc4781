//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Transport;

/// YNAB MCP server.
#[derive(Parser, Debug)]
#[command(name = "ynab-mcp-server")]
#[command(version)]
#[command(about = "Model Context Protocol server for YNAB budgets")]
#[command(
    long_about = "Exposes a YNAB budget to AI assistants over the Model Context Protocol.\n\nSet YNAB_ACCESS_TOKEN and run 'ynab-mcp-server serve'. Running with no subcommand also serves."
)]
pub struct Cli {
    /// Subcommand to execute; defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "YNAB_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Transport argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TransportArg {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// Streamable HTTP.
    Http,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Stdio => Transport::Stdio,
            TransportArg::Http => Transport::Http,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server.
    ///
    /// Flags override YNAB_MCP_* environment variables, which override the
    /// config file.
    Serve {
        /// Transport to serve on.
        #[arg(short, long)]
        transport: Option<TransportArg>,

        /// HTTP port.
        #[arg(short, long)]
        port: Option<u16>,

        /// HTTP bind address.
        #[arg(long)]
        host: Option<String>,
    },

    /// Show version information.
    Version,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Serve {
            transport: None,
            port: None,
            host: None,
        }
    }
}

//! Serve command implementation.
//!
//! Builds the upstream client from the resolved configuration and runs the
//! MCP server on the configured transport until shutdown.

use tokio_util::sync::CancellationToken;
use tracing::info;
use ynab_client::YnabClient;
use ynab_mcp::{http::run_http, run_stdio, YnabMcpServer};

use crate::config::{ServerConfig, Transport};
use crate::error::{CliError, CliResult};

/// Start the MCP server.
///
/// Blocks until the client disconnects (stdio) or `shutdown` is cancelled.
pub async fn serve(config: ServerConfig, shutdown: CancellationToken) -> CliResult<String> {
    config.validate()?;

    let client = YnabClient::new(config.access_token()?, config.client_config())?
        .with_cancellation(shutdown);
    let server = YnabMcpServer::new(client);

    info!(
        transport = %config.transport,
        base_url = %server.client().base_url(),
        max_attempts = config.retry.max_attempts,
        "Starting YNAB MCP server"
    );

    match config.transport {
        Transport::Stdio => {
            run_stdio(server)
                .await
                .map_err(|e| CliError::server(format!("MCP server error: {}", e)))?;
        }
        Transport::Http => {
            run_http(
                server,
                &config.http_host,
                config.http_port,
                config.mcp_auth_token.clone(),
            )
            .await
            .map_err(|e| {
                CliError::server(format!(
                    "HTTP server on {}:{} failed: {}",
                    config.http_host, config.http_port, e
                ))
            })?;
        }
    }

    Ok("Server stopped.".to_string())
}

//! Version command.

use ynab_client::DEFAULT_BASE_URL;
use ynab_mcp::http::SERVICE_NAME;

/// Version information printed by `ynab-mcp-server version`.
pub fn version() -> String {
    format!(
        "{} {}\nupstream: {}",
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        DEFAULT_BASE_URL
    )
}

//! MCP tool server for YNAB.
//!
//! Exposes a YNAB budget to AI assistants over the Model Context Protocol,
//! either on stdio ([`server::run_stdio`]) or as a streamable HTTP service
//! ([`http::run_http`]).
//!
//! Direct tools wrap one upstream call each (`list_budgets`,
//! `get_transaction_details`, `create_transaction`, ...). Aggregation tools
//! (`get_spending_by_category`, `get_spending_by_month`, `get_payee_summary`,
//! `get_budget_summary`, `get_account_balances`) fetch once and summarize
//! locally so the assistant never has to page through raw transactions.
//!
//! Every tool result is a single JSON text payload. Failures come back as
//! error results carrying `{error, code, message, suggestion}`.

pub mod error;
pub mod http;
pub mod server;
pub mod tools;

pub use error::{ErrorCode, ToolError, ToolResult};
pub use server::{run_stdio, tool_error, YnabMcpServer};

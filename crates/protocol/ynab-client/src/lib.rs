//! Resilient async client for the YNAB budgeting API.
//!
//! # Overview
//!
//! [`YnabClient`] wraps a `reqwest` connection pool with:
//! - **Authentication**: every request carries `Authorization: Bearer <token>`
//! - **Retries**: transport failures and HTTP 429 are retried with exponential
//!   backoff (see [`RetryPolicy`]); other 4xx responses are terminal, 5xx
//!   responses are terminal unless `retry_server_errors` is enabled
//! - **Error taxonomy**: every failure is a [`ClientError`] variant
//! - **Cancellation**: a `CancellationToken` aborts pending backoffs on shutdown
//!
//! # Usage
//!
//! ```rust,ignore
//! use ynab_client::{ClientConfig, TransactionQuery, YnabClient};
//!
//! # async fn example() -> ynab_client::ClientResult<()> {
//! let client = YnabClient::new("token", ClientConfig::default())?;
//! let budgets = client.list_budgets().await?;
//! let txs = client
//!     .list_transactions(&budgets[0].id, &TransactionQuery::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Lookups that the upstream only offers as lists (`get_account`,
//! `get_category`, `get_payee`) fetch the list and scan it, returning
//! [`ClientError::NotFound`] on a miss.

mod accounts;
mod budgets;
mod categories;
mod client;
mod config;
pub mod envelope;
mod error;
mod payees;
mod retry;
mod transactions;

pub use client::YnabClient;
pub use config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
pub use retry::RetryPolicy;
pub use transactions::{NewTransaction, TransactionQuery, TransactionUpdate};

pub use tokio_util::sync::CancellationToken;

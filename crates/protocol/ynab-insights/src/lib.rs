//! Spending summaries and balance snapshots over YNAB data.
//!
//! Every function here is a pure transform of already-fetched records. The
//! MCP server fetches through `ynab-client`, validates its date inputs with
//! [`validate_date_range`] or [`last_n_months`], then hands the records to
//! one of the grouping functions and serializes the result.
//!
//! All sums are accumulated in integer milliunits and converted to display
//! floats only during serialization, so totals are exact.
//!
//! # Exclusions
//!
//! Soft-deleted transactions and transfers between the user's own accounts
//! never count as spending. Split transactions contribute one line per live
//! split; see [`lines`] for the exact rules.

pub mod balances;
pub mod dates;
pub mod error;
pub mod grouping;
pub mod lines;
pub mod monthly;
pub mod overview;
pub mod totals;
mod units;

pub use balances::{account_balances, AccountBalance, BalanceSnapshot};
pub use dates::{
    filter_until, last_n_months, month_key, parse_date, parse_month, validate_date_range,
    DateRange, MAX_MONTHS, MAX_RANGE_DAYS, MIN_MONTHS,
};
pub use error::{InsightsError, InsightsResult};
pub use grouping::{
    aggregate_by_category, aggregate_by_payee, top_payees, CategorySummary, PayeeSummary,
    DEFAULT_TOP_N, NO_PAYEE_ID, NO_PAYEE_NAME, UNCATEGORIZED_ID, UNCATEGORIZED_NAME,
};
pub use lines::{counts_as_spending, spending_lines, SpendingLine};
pub use monthly::{aggregate_by_month, aggregate_by_month_in_category, monthly_averages, MonthSummary};
pub use overview::{budget_overview, BudgetOverview, CategoryOverview, GroupOverview};
pub use totals::Totals;

//! Data structures for the YNAB budgeting API.
//!
//! Every entity is a read-only snapshot decoded from an upstream response.
//! Nothing here performs I/O; the HTTP client lives in `ynab-client` and the
//! spending summaries in `ynab-insights`.
//!
//! # Money
//!
//! Amounts are signed integer [`Milliunits`] (1000 = one currency unit).
//! Negative amounts are outflows, positive amounts are inflows. Conversion to
//! display floats happens only at the edges, through [`milliunits_to_float`]
//! and [`float_to_milliunits`].
//!
//! # Soft deletes
//!
//! The upstream keeps deleted records in list responses with `deleted: true`.
//! Consumers must filter them; the types expose `is_active()` helpers for that.

pub mod account;
pub mod budget;
pub mod category;
pub mod money;
pub mod payee;
pub mod transaction;

pub use account::Account;
pub use budget::{Budget, BudgetMonth, BudgetSummary, CurrencyFormat, DateFormat};
pub use category::{Category, CategoryGroup};
pub use money::{float_to_milliunits, milliunits_to_float, Milliunits, MILLIUNITS_PER_UNIT};
pub use payee::Payee;
pub use transaction::{
    ClearedStatus, FlagColor, SubTransaction, Transaction, TransactionKind, DATE_FORMAT,
};

/// Returns true when an optional upstream string is present and non-empty.
///
/// The upstream encodes "no value" as either `null` or `""` depending on the
/// endpoint, so both must be treated the same.
pub fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

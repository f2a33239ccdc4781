//! Transactions and split subtransactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{is_present, Milliunits};

/// Calendar date format used by the upstream (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cleared state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearedStatus {
    /// Not yet seen on a bank statement
    #[default]
    Uncleared,
    /// Seen on a bank statement
    Cleared,
    /// Locked by a reconciliation
    Reconciled,
}

impl ClearedStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uncleared => "uncleared",
            Self::Cleared => "cleared",
            Self::Reconciled => "reconciled",
        }
    }

    /// Parse a wire name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uncleared" => Some(Self::Uncleared),
            "cleared" => Some(Self::Cleared),
            "reconciled" => Some(Self::Reconciled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClearedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flag colour attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

/// Server-side transaction filter accepted by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Transactions without a category
    Uncategorized,
    /// Transactions not yet approved
    Unapproved,
}

impl TransactionKind {
    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uncategorized => "uncategorized",
            Self::Unapproved => "unapproved",
        }
    }

    /// Parse a query-string value, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uncategorized" => Some(Self::Uncategorized),
            "unapproved" => Some(Self::Unapproved),
            _ => None,
        }
    }
}

/// A ledger entry.
///
/// `date` is kept as the raw upstream string so that a single malformed
/// record does not fail decoding of a whole list; use [`Transaction::parsed_date`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    /// Signed amount; negative is an outflow.
    pub amount: Milliunits,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub cleared: ClearedStatus,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub flag_color: Option<FlagColor>,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub payee_id: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    /// Set when the transaction moves money to another account in the budget.
    #[serde(default)]
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub transfer_transaction_id: Option<String>,
    #[serde(default)]
    pub matched_transaction_id: Option<String>,
    #[serde(default)]
    pub import_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub subtransactions: Vec<SubTransaction>,
}

impl Transaction {
    /// Not soft-deleted.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// True when this transaction is an inter-account transfer.
    pub fn is_transfer(&self) -> bool {
        is_present(&self.transfer_account_id)
    }

    /// Parsed calendar date, or `None` if the upstream sent something odd.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// True when the transaction has at least one non-deleted split.
    pub fn is_split(&self) -> bool {
        self.subtransactions.iter().any(|s| !s.deleted)
    }
}

/// One line of a split transaction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubTransaction {
    pub id: String,
    #[serde(default)]
    pub transaction_id: String,
    pub amount: Milliunits,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub payee_id: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub transfer_transaction_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl SubTransaction {
    /// True when this split moves money to another account.
    pub fn is_transfer(&self) -> bool {
        is_present(&self.transfer_account_id)
    }
}

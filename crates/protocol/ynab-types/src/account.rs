//! Accounts.

use serde::{Deserialize, Serialize};

use crate::Milliunits;

/// A budget account (checking, savings, credit card, tracking, …).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Upstream account type, e.g. `checking`, `creditCard`, `otherAsset`.
    #[serde(rename = "type", default)]
    pub account_type: String,
    /// Whether the balance counts toward the tracked budget.
    #[serde(default)]
    pub on_budget: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub balance: Milliunits,
    #[serde(default)]
    pub cleared_balance: Milliunits,
    #[serde(default)]
    pub uncleared_balance: Milliunits,
    #[serde(default)]
    pub transfer_payee_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

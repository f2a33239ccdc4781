//! Payees.

use serde::{Deserialize, Serialize};

/// A payee. Transfer payees stand for another account in the same budget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Payee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub transfer_account_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl Payee {
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

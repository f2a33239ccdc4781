//! Response and request wrappers used on the wire.
//!
//! Every successful upstream response is `{"data": …}`; every error response is
//! `{"error": {"id", "name", "detail"}}`.

use serde::{Deserialize, Serialize};
use ynab_types::{
    Account, Budget, BudgetMonth, BudgetSummary, Category, CategoryGroup, Payee, Transaction,
};

/// Success wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Error wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

/// Structured upstream error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    /// Extract `error.detail` from a raw body, if the body has that shape.
    pub fn detail_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error.detail)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetsData {
    pub budgets: Vec<BudgetSummary>,
    #[serde(default)]
    pub default_budget: Option<BudgetSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetData {
    pub budget: Budget,
    #[serde(default)]
    pub server_knowledge: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountsData {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesData {
    pub category_groups: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryData {
    pub category: Category,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthData {
    pub month: BudgetMonth,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayeesData {
    pub payees: Vec<Payee>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsData {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionData {
    pub transaction: Transaction,
}

/// Request body for create/update: `{"transaction": {…}}`.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionBody<'a, T: Serialize> {
    pub transaction: &'a T,
}

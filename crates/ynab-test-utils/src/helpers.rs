//! Fixture builders for upstream entities.
//!
//! The builders start from a minimal valid record and let each test set only
//! the fields it cares about.

use ynab_types::{
    Account, BudgetMonth, BudgetSummary, Category, CategoryGroup, ClearedStatus, Payee,
    SubTransaction, Transaction,
};

/// Fluent builder for [`Transaction`].
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    /// Start a transaction dated 2024-01-15 with a zero amount.
    pub fn new(id: &str) -> Self {
        Self {
            tx: Transaction {
                id: id.to_string(),
                date: "2024-01-15".to_string(),
                account_id: "acct-checking".to_string(),
                account_name: "Checking".to_string(),
                approved: true,
                ..Default::default()
            },
        }
    }

    pub fn date(mut self, date: &str) -> Self {
        self.tx.date = date.to_string();
        self
    }

    /// Signed amount in milliunits.
    pub fn amount(mut self, amount: i64) -> Self {
        self.tx.amount = amount;
        self
    }

    pub fn category(mut self, id: &str, name: &str) -> Self {
        self.tx.category_id = Some(id.to_string());
        self.tx.category_name = Some(name.to_string());
        self
    }

    pub fn payee(mut self, id: &str, name: &str) -> Self {
        self.tx.payee_id = Some(id.to_string());
        self.tx.payee_name = Some(name.to_string());
        self
    }

    pub fn account(mut self, id: &str, name: &str) -> Self {
        self.tx.account_id = id.to_string();
        self.tx.account_name = name.to_string();
        self
    }

    pub fn memo(mut self, memo: &str) -> Self {
        self.tx.memo = Some(memo.to_string());
        self
    }

    pub fn cleared(mut self, status: ClearedStatus) -> Self {
        self.tx.cleared = status;
        self
    }

    /// Mark as a transfer to another account.
    pub fn transfer_to(mut self, account_id: &str) -> Self {
        self.tx.transfer_account_id = Some(account_id.to_string());
        self
    }

    pub fn deleted(mut self) -> Self {
        self.tx.deleted = true;
        self
    }

    /// Append a split line.
    pub fn split(mut self, sub: SubTransaction) -> Self {
        self.tx.subtransactions.push(sub);
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

/// Split line with a category and amount.
pub fn split_line(id: &str, amount: i64, category_id: &str, category_name: &str) -> SubTransaction {
    SubTransaction {
        id: id.to_string(),
        amount,
        category_id: Some(category_id.to_string()),
        category_name: Some(category_name.to_string()),
        ..Default::default()
    }
}

/// Account with the given balance in milliunits.
///
/// Cleared balance equals the balance; uncleared is zero.
pub fn account(id: &str, name: &str, balance: i64, on_budget: bool, closed: bool) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        account_type: if on_budget { "checking" } else { "otherAsset" }.to_string(),
        on_budget,
        closed,
        balance,
        cleared_balance: balance,
        uncleared_balance: 0,
        ..Default::default()
    }
}

/// Category with month figures in milliunits.
pub fn category(id: &str, name: &str, group_id: &str, budgeted: i64, activity: i64) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        category_group_id: group_id.to_string(),
        budgeted,
        activity,
        balance: budgeted + activity,
        ..Default::default()
    }
}

pub fn category_group(id: &str, name: &str, categories: Vec<Category>) -> CategoryGroup {
    let categories = categories
        .into_iter()
        .map(|mut c| {
            c.category_group_id = id.to_string();
            c.category_group_name = Some(name.to_string());
            c
        })
        .collect();
    CategoryGroup {
        id: id.to_string(),
        name: name.to_string(),
        categories,
        ..Default::default()
    }
}

pub fn payee(id: &str, name: &str) -> Payee {
    Payee {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn budget_summary(id: &str, name: &str) -> BudgetSummary {
    BudgetSummary {
        id: id.to_string(),
        name: name.to_string(),
        first_month: Some("2023-01-01".to_string()),
        last_month: Some("2024-06-01".to_string()),
        ..Default::default()
    }
}

/// Budget month starting on `month` (`YYYY-MM-DD`).
pub fn budget_month(month: &str, to_be_budgeted: i64, categories: Vec<Category>) -> BudgetMonth {
    BudgetMonth {
        month: month.to_string(),
        to_be_budgeted,
        categories,
        ..Default::default()
    }
}

//! Budgets and budget months.

use serde::{Deserialize, Serialize};

use crate::{Account, Category, CategoryGroup, Milliunits, Payee, Transaction};

/// Date display settings of a budget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateFormat {
    pub format: String,
}

/// Currency display settings of a budget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub iso_code: String,
    #[serde(default)]
    pub example_format: String,
    #[serde(default)]
    pub decimal_digits: u32,
    #[serde(default)]
    pub decimal_separator: String,
    #[serde(default)]
    pub symbol_first: bool,
    #[serde(default)]
    pub group_separator: String,
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(default)]
    pub display_symbol: bool,
}

/// Budget as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_modified_on: Option<String>,
    #[serde(default)]
    pub first_month: Option<String>,
    #[serde(default)]
    pub last_month: Option<String>,
    #[serde(default)]
    pub date_format: Option<DateFormat>,
    #[serde(default)]
    pub currency_format: Option<CurrencyFormat>,
}

/// Full budget export with every owned entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_modified_on: Option<String>,
    #[serde(default)]
    pub first_month: Option<String>,
    #[serde(default)]
    pub last_month: Option<String>,
    #[serde(default)]
    pub date_format: Option<DateFormat>,
    #[serde(default)]
    pub currency_format: Option<CurrencyFormat>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub category_groups: Vec<CategoryGroup>,
    /// Flat category list; group membership is via `category_group_id`.
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub payees: Vec<Payee>,
    #[serde(default)]
    pub months: Vec<BudgetMonth>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// One month of a budget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetMonth {
    /// First day of the month, `YYYY-MM-DD`.
    pub month: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub income: Milliunits,
    #[serde(default)]
    pub budgeted: Milliunits,
    #[serde(default)]
    pub activity: Milliunits,
    #[serde(default)]
    pub to_be_budgeted: Milliunits,
    #[serde(default)]
    pub age_of_money: Option<u32>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

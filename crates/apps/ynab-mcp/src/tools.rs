//! MCP tool input/output types.
//!
//! Inputs are deserialized from the tool call arguments and described to the
//! assistant through their JSON schema. Outputs are serialized to a single
//! JSON text payload. Money is always reported in display units (dollars,
//! euros, ...), never in milliunits.

use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use ynab_insights::{BalanceSnapshot, CategorySummary, DateRange, MonthSummary, PayeeSummary};
use ynab_types::{
    milliunits_to_float, Account, Budget, BudgetSummary, Category, CategoryGroup, CurrencyFormat,
    Payee, SubTransaction, Transaction,
};

/// Most transactions returned by `list_transactions`.
pub const MAX_LISTED_TRANSACTIONS: usize = 50;

// ============================================================================
// Shared inputs
// ============================================================================

/// Input naming a budget.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BudgetInput {
    /// The ID of the budget (from list_budgets).
    pub budget_id: String,
}

// ============================================================================
// Budgets
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BudgetInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<&BudgetSummary> for BudgetInfo {
    fn from(b: &BudgetSummary) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            last_modified_on: b.last_modified_on.clone(),
            first_month: b.first_month.clone(),
            last_month: b.last_month.clone(),
            currency: b.currency_format.as_ref().map(|c| c.iso_code.clone()),
        }
    }
}

impl From<&Budget> for BudgetInfo {
    fn from(b: &Budget) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            last_modified_on: b.last_modified_on.clone(),
            first_month: b.first_month.clone(),
            last_month: b.last_month.clone(),
            currency: b.currency_format.as_ref().map(|c| c.iso_code.clone()),
        }
    }
}

/// Output from the `list_budgets` tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListBudgetsOutput {
    pub budgets: Vec<BudgetInfo>,
}

/// Output from the `get_budget_details` tool.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetDetailsOutput {
    #[serde(flatten)]
    pub budget: BudgetInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_format: Option<CurrencyFormat>,
    pub account_count: usize,
    pub category_count: usize,
    pub payee_count: usize,
    pub accounts: Vec<AccountInfo>,
}

// ============================================================================
// Accounts
// ============================================================================

/// Input for the `get_account_details` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// The ID of the account (from list_accounts).
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub on_budget: bool,
    pub closed: bool,
    pub balance: f64,
    pub cleared_balance: f64,
    pub uncleared_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&Account> for AccountInfo {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            account_type: a.account_type.clone(),
            on_budget: a.on_budget,
            closed: a.closed,
            balance: milliunits_to_float(a.balance),
            cleared_balance: milliunits_to_float(a.cleared_balance),
            uncleared_balance: milliunits_to_float(a.uncleared_balance),
            note: a.note.clone().filter(|n| !n.is_empty()),
        }
    }
}

/// Output from the `list_accounts` tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListAccountsOutput {
    pub accounts: Vec<AccountInfo>,
}

// ============================================================================
// Transactions
// ============================================================================

/// Input for the `list_transactions` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTransactionsInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// Only return transactions on or after this date (YYYY-MM-DD).
    #[serde(default)]
    pub since_date: Option<String>,
    /// Filter by type: "uncategorized" or "unapproved".
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Only return transactions for this account.
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Input naming one transaction.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TransactionInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// The ID of the transaction.
    pub transaction_id: String,
}

/// Input for the `create_transaction` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTransactionInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// The account the transaction belongs to.
    pub account_id: String,
    /// Amount in currency units; negative for outflow (e.g. -45.67).
    pub amount: f64,
    /// Transaction date (YYYY-MM-DD). Defaults to today.
    #[serde(default)]
    pub date: Option<String>,
    /// Payee name; a new payee is created if none matches.
    #[serde(default)]
    pub payee_name: Option<String>,
    /// Category ID (from list_categories).
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    /// "cleared", "uncleared" or "reconciled". Defaults to uncleared.
    #[serde(default)]
    pub cleared: Option<String>,
}

/// Input for the `update_transaction` tool. Only the given fields change.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTransactionInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// The ID of the transaction to update.
    pub transaction_id: String,
    /// New date (YYYY-MM-DD).
    #[serde(default)]
    pub date: Option<String>,
    /// New amount in currency units; negative for outflow.
    #[serde(default)]
    pub amount: Option<f64>,
    /// New payee name. Blank means unchanged; a payee cannot be cleared.
    #[serde(default)]
    pub payee_name: Option<String>,
    /// New category ID. Blank means unchanged.
    #[serde(default)]
    pub category_id: Option<String>,
    /// New memo. Blank means unchanged; clearing a memo is not supported.
    #[serde(default)]
    pub memo: Option<String>,
    /// "cleared", "uncleared" or "reconciled".
    #[serde(default)]
    pub cleared: Option<String>,
    #[serde(default)]
    pub approved: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitInfo {
    pub id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<String>,
}

impl From<&SubTransaction> for SplitInfo {
    fn from(s: &SubTransaction) -> Self {
        Self {
            id: s.id.clone(),
            amount: milliunits_to_float(s.amount),
            memo: s.memo.clone(),
            payee_name: s.payee_name.clone(),
            category_id: s.category_id.clone(),
            category_name: s.category_name.clone(),
            transfer_account_id: s.transfer_account_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionInfo {
    pub id: String,
    pub date: String,
    pub amount: f64,
    pub cleared: String,
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtransactions: Vec<SplitInfo>,
}

impl From<&Transaction> for TransactionInfo {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.clone(),
            amount: milliunits_to_float(t.amount),
            cleared: t.cleared.to_string(),
            approved: t.approved,
            payee_name: t.payee_name.clone(),
            category_id: t.category_id.clone(),
            category_name: t.category_name.clone(),
            account_id: t.account_id.clone(),
            account_name: Some(t.account_name.clone()),
            memo: t.memo.clone().filter(|m| !m.is_empty()),
            transfer_account_id: t.transfer_account_id.clone(),
            subtransactions: t
                .subtransactions
                .iter()
                .filter(|s| !s.deleted)
                .map(SplitInfo::from)
                .collect(),
        }
    }
}

/// Output from the `list_transactions` tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListTransactionsOutput {
    /// Non-deleted transactions found.
    pub total_count: usize,
    /// Transactions left out of `transactions`.
    pub remaining_count: usize,
    /// Sum of the listed amounts.
    pub total_amount: f64,
    pub transactions: Vec<TransactionInfo>,
}

// ============================================================================
// Categories
// ============================================================================

/// Input for the `get_category_details` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CategoryInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// The ID of the category.
    pub category_id: String,
    /// Month (YYYY-MM) to report figures for. Defaults to the current month.
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_group_name: Option<String>,
    pub budgeted: f64,
    pub activity: f64,
    pub available: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_target_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_percentage_complete: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_under_funded: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub overspent: bool,
}

impl From<&Category> for CategoryInfo {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            category_group_name: c.category_group_name.clone(),
            budgeted: milliunits_to_float(c.budgeted),
            activity: milliunits_to_float(c.activity),
            available: milliunits_to_float(c.balance),
            goal_type: c.goal_type.clone().filter(|g| !g.is_empty()),
            goal_target: c.goal_target.filter(|t| *t > 0).map(milliunits_to_float),
            goal_target_month: c.goal_target_month.clone(),
            goal_percentage_complete: c.goal_percentage_complete,
            goal_under_funded: c.goal_under_funded.map(milliunits_to_float),
            note: c.note.clone().filter(|n| !n.is_empty()),
            overspent: c.is_overspent(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroupInfo {
    pub id: String,
    pub name: String,
    pub categories: Vec<CategoryInfo>,
}

impl From<&CategoryGroup> for CategoryGroupInfo {
    fn from(g: &CategoryGroup) -> Self {
        Self {
            id: g.id.clone(),
            name: g.name.clone(),
            categories: g.active_categories().map(CategoryInfo::from).collect(),
        }
    }
}

/// Output from the `list_categories` tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListCategoriesOutput {
    pub category_groups: Vec<CategoryGroupInfo>,
}

/// Output from the `get_category_details` tool.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetailsOutput {
    /// `YYYY-MM`, present for a month-scoped lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(flatten)]
    pub category: CategoryInfo,
}

// ============================================================================
// Payees
// ============================================================================

/// Input naming one payee.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PayeeInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// The ID of the payee (from list_payees).
    pub payee_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayeeInfo {
    pub id: String,
    pub name: String,
    /// Set for transfer payees: the account money moves to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<String>,
}

impl From<&Payee> for PayeeInfo {
    fn from(p: &Payee) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            transfer_account_id: p.transfer_account_id.clone().filter(|t| !t.is_empty()),
        }
    }
}

/// Output from the `list_payees` tool.
#[derive(Debug, Clone, Serialize)]
pub struct ListPayeesOutput {
    pub payees: Vec<PayeeInfo>,
}

// ============================================================================
// Aggregations
// ============================================================================

/// Input for the `get_spending_by_category` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpendingByCategoryInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// Start date (YYYY-MM-DD), inclusive.
    pub since_date: String,
    /// End date (YYYY-MM-DD), inclusive. At most two years after since_date.
    pub until_date: String,
    /// Only count transactions in this account.
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Output from the `get_spending_by_category` tool.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingByCategoryOutput {
    pub categories: Vec<CategorySummary>,
    pub total_outflow: f64,
    pub total_inflow: f64,
    pub date_range: DateRange,
}

/// Input for the `get_spending_by_month` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpendingByMonthInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// Number of months to report, ending with the current month (1-24).
    pub num_months: i64,
    /// Only count spending in this category.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Only count transactions in this account.
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Output from the `get_spending_by_month` tool.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingByMonthOutput {
    pub months: Vec<MonthSummary>,
    pub category_name: String,
    pub average_monthly_outflow: f64,
    pub average_monthly_inflow: f64,
}

/// Input for the `get_payee_summary` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PayeeSummaryInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// Start date (YYYY-MM-DD), inclusive.
    pub since_date: String,
    /// End date (YYYY-MM-DD), inclusive.
    pub until_date: String,
    /// Number of payees to return (default 20).
    #[serde(default)]
    pub top_n: Option<i64>,
    /// Only count transactions in this account.
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Output from the `get_payee_summary` tool.
#[derive(Debug, Clone, Serialize)]
pub struct PayeeSummaryOutput {
    pub payees: Vec<PayeeSummary>,
    pub date_range: DateRange,
}

/// Input for the `get_budget_summary` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BudgetSummaryInput {
    /// The ID of the budget.
    pub budget_id: String,
    /// Month (YYYY-MM). Defaults to the current month.
    #[serde(default)]
    pub month: Option<String>,
}

/// Output from the `get_account_balances` tool.
pub type AccountBalancesOutput = BalanceSnapshot;

/// Treat `Some("")` as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ynab_test_utils::{account, category, split_line, TransactionBuilder};

    #[test]
    fn test_transaction_info_drops_deleted_splits() {
        let mut gone = split_line("s2", -1_000, "cat-b", "B");
        gone.deleted = true;
        let tx = TransactionBuilder::new("t1")
            .amount(-3_000)
            .memo("")
            .split(split_line("s1", -2_000, "cat-a", "A"))
            .split(gone)
            .build();

        let info = TransactionInfo::from(&tx);
        assert_eq!(info.amount, -3.0);
        assert_eq!(info.subtransactions.len(), 1);
        assert_eq!(info.memo, None);
        assert_eq!(info.cleared, "uncleared");
    }

    #[test]
    fn test_account_info_units() {
        let info = AccountInfo::from(&account("a", "Checking", 1_234_560, true, false));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["balance"], 1234.56);
        assert_eq!(json["type"], "checking");
    }

    #[test]
    fn test_category_info_goal() {
        let mut cat = category("c", "Rent", "g", 1_000_000, -250_000);
        cat.goal_target = Some(0);
        let info = CategoryInfo::from(&cat);
        assert_eq!(info.goal_target, None);
        assert_eq!(info.available, 750.0);
        assert!(!info.overspent);
    }

    #[test]
    fn test_input_schema_names_type_field() {
        let input: ListTransactionsInput = serde_json::from_value(serde_json::json!({
            "budget_id": "b1",
            "type": "unapproved"
        }))
        .unwrap();
        assert_eq!(input.kind.as_deref(), Some("unapproved"));
        assert!(input.since_date.is_none());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  ".into())), None);
        assert_eq!(non_blank(&Some(" x ".into())), Some("x"));
        assert_eq!(non_blank(&None), None);
    }
}

//! Spending grouped by category and by payee.

use std::collections::HashMap;

use serde::Serialize;
use ynab_types::Transaction;

use crate::lines::{spending_lines, SpendingLine};
use crate::totals::Totals;

/// Bucket for lines without a category.
pub const UNCATEGORIZED_ID: &str = "uncategorized";
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Bucket for lines without a payee.
pub const NO_PAYEE_ID: &str = "no-payee";
pub const NO_PAYEE_NAME: &str = "No Payee";

/// Default number of payees kept by [`top_payees`].
pub const DEFAULT_TOP_N: usize = 20;

/// Spending in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category_id: String,
    pub category_name: String,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Spending with one payee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayeeSummary {
    pub payee_id: String,
    pub payee_name: String,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Groups lines by key, remembering first-seen order.
struct Grouper {
    index: HashMap<String, usize>,
    groups: Vec<(String, String, Totals)>,
}

impl Grouper {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn add(&mut self, key: &str, name: String, amount: i64) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.groups.push((key.to_string(), name, Totals::default()));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].2.add(amount);
    }

    /// Groups sorted by outflow, largest first; ties keep first-seen order.
    fn into_sorted(mut self) -> Vec<(String, String, Totals)> {
        self.groups
            .sort_by(|a, b| b.2.total_outflow.cmp(&a.2.total_outflow));
        self.groups
    }
}

fn category_key<'a>(line: &SpendingLine<'a>) -> (&'a str, String) {
    match line.category_id {
        Some(id) => (id, line.category_name.unwrap_or_default().to_string()),
        None => (UNCATEGORIZED_ID, UNCATEGORIZED_NAME.to_string()),
    }
}

fn payee_key<'a>(line: &SpendingLine<'a>) -> (&'a str, String) {
    match line.payee_id {
        Some(id) => (id, line.payee_name.unwrap_or_default().to_string()),
        None => (NO_PAYEE_ID, NO_PAYEE_NAME.to_string()),
    }
}

/// Group spending by category, largest outflow first.
///
/// Deleted transactions and transfers are excluded; split transactions
/// contribute one line per split.
///
/// # Example
/// ```
/// use ynab_insights::aggregate_by_category;
/// use ynab_types::Transaction;
///
/// let tx = Transaction {
///     id: "t1".into(),
///     date: "2024-01-05".into(),
///     amount: -12_000,
///     category_id: Some("food".into()),
///     category_name: Some("Food".into()),
///     ..Default::default()
/// };
/// let summaries = aggregate_by_category(&[tx]);
/// assert_eq!(summaries[0].category_name, "Food");
/// assert_eq!(summaries[0].totals.total_outflow, 12_000);
/// ```
pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut grouper = Grouper::new();
    for line in spending_lines(transactions) {
        let (key, name) = category_key(&line);
        grouper.add(key, name, line.amount);
    }
    grouper
        .into_sorted()
        .into_iter()
        .map(|(category_id, category_name, totals)| CategorySummary {
            category_id,
            category_name,
            totals,
        })
        .collect()
}

/// Group spending by payee, largest outflow first.
pub fn aggregate_by_payee(transactions: &[Transaction]) -> Vec<PayeeSummary> {
    let mut grouper = Grouper::new();
    for line in spending_lines(transactions) {
        let (key, name) = payee_key(&line);
        grouper.add(key, name, line.amount);
    }
    grouper
        .into_sorted()
        .into_iter()
        .map(|(payee_id, payee_name, totals)| PayeeSummary {
            payee_id,
            payee_name,
            totals,
        })
        .collect()
}

/// The `top_n` payees by outflow; `top_n` is at least 1.
pub fn top_payees(transactions: &[Transaction], top_n: usize) -> Vec<PayeeSummary> {
    let mut payees = aggregate_by_payee(transactions);
    payees.truncate(top_n.max(1));
    payees
}

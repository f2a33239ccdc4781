//! Spending lines: the unit every grouping function accumulates.
//!
//! A transaction is dropped when it is soft-deleted or a transfer. A surviving
//! transaction with live splits yields one line per split that is itself
//! neither deleted nor a transfer; the split keeps the parent's date and
//! inherits the parent's payee when it has none. Any other surviving
//! transaction yields a single line.
//!
//! Splits are expanded per subtransaction rather than grouped under the
//! parent, so a split purchase counts once per split line in every
//! `transaction_count`, not once per transaction.

use chrono::NaiveDate;
use ynab_types::{is_present, Milliunits, SubTransaction, Transaction};

/// One contribution to a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendingLine<'a> {
    pub date: &'a str,
    pub amount: Milliunits,
    pub category_id: Option<&'a str>,
    pub category_name: Option<&'a str>,
    pub payee_id: Option<&'a str>,
    pub payee_name: Option<&'a str>,
}

impl<'a> SpendingLine<'a> {
    fn from_transaction(tx: &'a Transaction) -> Self {
        Self {
            date: &tx.date,
            amount: tx.amount,
            category_id: non_empty(&tx.category_id),
            category_name: non_empty(&tx.category_name),
            payee_id: non_empty(&tx.payee_id),
            payee_name: non_empty(&tx.payee_name),
        }
    }

    fn from_split(parent: &'a Transaction, sub: &'a SubTransaction) -> Self {
        let (payee_id, payee_name) = if is_present(&sub.payee_id) {
            (non_empty(&sub.payee_id), non_empty(&sub.payee_name))
        } else {
            (non_empty(&parent.payee_id), non_empty(&parent.payee_name))
        };
        Self {
            date: &parent.date,
            amount: sub.amount,
            category_id: non_empty(&sub.category_id),
            category_name: non_empty(&sub.category_name),
            payee_id,
            payee_name,
        }
    }

    /// Parsed date, `None` when malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date, ynab_types::DATE_FORMAT).ok()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// True when the transaction takes part in spending summaries.
pub fn counts_as_spending(tx: &Transaction) -> bool {
    tx.is_active() && !tx.is_transfer()
}

/// Expand transactions into spending lines, applying the exclusion rules.
pub fn spending_lines(transactions: &[Transaction]) -> impl Iterator<Item = SpendingLine<'_>> {
    transactions
        .iter()
        .filter(|tx| counts_as_spending(tx))
        .flat_map(|tx| {
            let lines: Vec<SpendingLine<'_>> = if tx.is_split() {
                tx.subtransactions
                    .iter()
                    .filter(|sub| !sub.deleted && !sub.is_transfer())
                    .map(|sub| SpendingLine::from_split(tx, sub))
                    .collect()
            } else {
                vec![SpendingLine::from_transaction(tx)]
            };
            lines
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ynab_test_utils::{split_line, TransactionBuilder};

    #[test]
    fn test_deleted_and_transfers_excluded() {
        let txs = vec![
            TransactionBuilder::new("keep").amount(-1000).build(),
            TransactionBuilder::new("gone").amount(-2000).deleted().build(),
            TransactionBuilder::new("xfer")
                .amount(-3000)
                .transfer_to("acct-savings")
                .build(),
        ];
        let amounts: Vec<i64> = spending_lines(&txs).map(|l| l.amount).collect();
        assert_eq!(amounts, vec![-1000]);
    }

    #[test]
    fn test_split_expansion() {
        let mut transfer_split = split_line("s3", -5000, "", "");
        transfer_split.category_id = None;
        transfer_split.transfer_account_id = Some("acct-savings".into());

        let mut deleted_split = split_line("s4", -7000, "cat-x", "X");
        deleted_split.deleted = true;

        let mut payee_split = split_line("s2", -3000, "cat-home", "Home");
        payee_split.payee_id = Some("payee-hw".into());
        payee_split.payee_name = Some("Hardware".into());

        let tx = TransactionBuilder::new("split")
            .date("2024-04-02")
            .amount(-15000)
            .payee("payee-mart", "Mart")
            .split(split_line("s1", -7000, "cat-food", "Food"))
            .split(payee_split)
            .split(transfer_split)
            .split(deleted_split)
            .build();

        let txs = [tx];
        let lines: Vec<SpendingLine<'_>> = spending_lines(&txs).collect();
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0].amount, -7000);
        assert_eq!(lines[0].category_id, Some("cat-food"));
        assert_eq!(lines[0].payee_id, Some("payee-mart"));
        assert_eq!(lines[0].date, "2024-04-02");

        assert_eq!(lines[1].payee_name, Some("Hardware"));
        assert_eq!(lines[1].category_name, Some("Home"));
    }

    #[test]
    fn test_only_deleted_splits_counts_parent() {
        let mut sub = split_line("s1", -1000, "cat-a", "A");
        sub.deleted = true;
        let txs = [TransactionBuilder::new("t")
            .amount(-1000)
            .category("cat-b", "B")
            .split(sub)
            .build()];

        let lines: Vec<SpendingLine<'_>> = spending_lines(&txs).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].category_id, Some("cat-b"));
    }

    #[test]
    fn test_empty_strings_treated_as_absent() {
        let mut tx = TransactionBuilder::new("t").amount(500).build();
        tx.category_id = Some(String::new());
        tx.payee_id = Some(String::new());

        let txs = [tx];
        let line = spending_lines(&txs).next().unwrap();
        assert_eq!(line.category_id, None);
        assert_eq!(line.payee_id, None);
    }
}

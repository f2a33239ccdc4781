//! Spending per calendar month.

use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;
use ynab_types::{milliunits_to_float, Transaction};

use crate::dates::month_key;
use crate::lines::spending_lines;
use crate::totals::Totals;

/// Spending in one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: String,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Group spending into the given months.
///
/// Every month in `months` appears exactly once in the output, in the given
/// order, zero-filled when nothing matched. Lines outside those months or
/// with an unparseable date are skipped.
pub fn aggregate_by_month(transactions: &[Transaction], months: &[String]) -> Vec<MonthSummary> {
    aggregate_months(transactions, months, None)
}

/// Like [`aggregate_by_month`], counting only lines in `category_id`.
///
/// Split transactions are matched per split, so a split line in the category
/// counts even when the parent has no category of its own.
pub fn aggregate_by_month_in_category(
    transactions: &[Transaction],
    months: &[String],
    category_id: &str,
) -> Vec<MonthSummary> {
    aggregate_months(transactions, months, Some(category_id))
}

fn aggregate_months(
    transactions: &[Transaction],
    months: &[String],
    category_id: Option<&str>,
) -> Vec<MonthSummary> {
    let mut summaries: Vec<MonthSummary> = months
        .iter()
        .map(|month| MonthSummary {
            month: month.clone(),
            totals: Totals::default(),
        })
        .collect();
    let index: HashMap<&str, usize> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (m.as_str(), i))
        .collect();

    for line in spending_lines(transactions) {
        if category_id.is_some_and(|wanted| line.category_id != Some(wanted)) {
            continue;
        }
        let Some(date) = line.parsed_date() else {
            trace!(date = line.date, "Skipping line with unparseable date");
            continue;
        };
        if let Some(&slot) = index.get(month_key(date).as_str()) {
            summaries[slot].totals.add(line.amount);
        }
    }

    summaries
}

/// Average monthly outflow and inflow in display units.
///
/// Returns `(0.0, 0.0)` for an empty slice.
pub fn monthly_averages(months: &[MonthSummary]) -> (f64, f64) {
    if months.is_empty() {
        return (0.0, 0.0);
    }
    let total = Totals::combine(months.iter().map(|m| &m.totals));
    let n = months.len() as f64;
    (
        milliunits_to_float(total.total_outflow) / n,
        milliunits_to_float(total.total_inflow) / n,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ynab_test_utils::{split_line, TransactionBuilder};

    fn months(list: &[&str]) -> Vec<String> {
        list.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_every_month_present_in_order() {
        let txs = vec![
            TransactionBuilder::new("a").date("2024-03-05").amount(-1_000).build(),
            TransactionBuilder::new("b").date("2024-01-20").amount(-2_000).build(),
            TransactionBuilder::new("c").date("2023-12-31").amount(-4_000).build(),
            TransactionBuilder::new("d").date("bogus").amount(-8_000).build(),
        ];

        let result = aggregate_by_month(&txs, &months(&["2024-01", "2024-02", "2024-03"]));
        let keys: Vec<&str> = result.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);

        assert_eq!(result[0].totals.total_outflow, 2_000);
        assert_eq!(result[1].totals, Totals::default());
        assert_eq!(result[2].totals.total_outflow, 1_000);
    }

    #[test]
    fn test_transfers_and_deleted_skipped() {
        let txs = vec![
            TransactionBuilder::new("a")
                .date("2024-01-05")
                .amount(-1_000)
                .transfer_to("acct-2")
                .build(),
            TransactionBuilder::new("b").date("2024-01-05").amount(-1_000).deleted().build(),
        ];
        let result = aggregate_by_month(&txs, &months(&["2024-01"]));
        assert_eq!(result[0].totals.transaction_count, 0);
    }

    #[test]
    fn test_category_filter_matches_split_lines() {
        let txs = vec![
            TransactionBuilder::new("plain")
                .date("2024-02-01")
                .amount(-3_000)
                .category("cat-food", "Food")
                .build(),
            TransactionBuilder::new("other")
                .date("2024-02-02")
                .amount(-9_000)
                .category("cat-rent", "Rent")
                .build(),
            TransactionBuilder::new("split")
                .date("2024-02-03")
                .amount(-5_000)
                .split(split_line("s1", -2_000, "cat-food", "Food"))
                .split(split_line("s2", -3_000, "cat-home", "Home"))
                .build(),
        ];

        let result = aggregate_by_month_in_category(&txs, &months(&["2024-02"]), "cat-food");
        assert_eq!(result[0].totals.total_outflow, 5_000);
        assert_eq!(result[0].totals.transaction_count, 2);
    }

    #[test]
    fn test_monthly_averages() {
        let txs = vec![
            TransactionBuilder::new("a").date("2024-01-05").amount(-30_000).build(),
            TransactionBuilder::new("b").date("2024-02-05").amount(15_000).build(),
        ];
        let result = aggregate_by_month(&txs, &months(&["2024-01", "2024-02", "2024-03"]));
        let (outflow, inflow) = monthly_averages(&result);
        assert_eq!(outflow, 10.0);
        assert_eq!(inflow, 5.0);

        assert_eq!(monthly_averages(&[]), (0.0, 0.0));
    }
}

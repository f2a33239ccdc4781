//! Account balance snapshot.

use serde::Serialize;
use ynab_types::{Account, Milliunits};

/// Balances of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub account_id: String,
    pub account_name: String,
    pub account_type: String,
    pub on_budget: bool,
    pub closed: bool,
    #[serde(serialize_with = "crate::units::serialize")]
    pub cleared_balance: Milliunits,
    #[serde(serialize_with = "crate::units::serialize")]
    pub uncleared_balance: Milliunits,
    #[serde(serialize_with = "crate::units::serialize")]
    pub current_balance: Milliunits,
}

/// All non-deleted accounts plus totals over the open ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSnapshot {
    pub accounts: Vec<AccountBalance>,
    #[serde(serialize_with = "crate::units::serialize")]
    pub total_on_budget: Milliunits,
    #[serde(serialize_with = "crate::units::serialize")]
    pub total_off_budget: Milliunits,
    #[serde(serialize_with = "crate::units::serialize")]
    pub net_worth: Milliunits,
}

/// Build a balance snapshot.
///
/// Deleted accounts are dropped. Closed accounts are listed but left out of
/// the totals. `net_worth` is the on-budget plus off-budget total.
pub fn account_balances(accounts: &[Account]) -> BalanceSnapshot {
    let mut snapshot = BalanceSnapshot {
        accounts: Vec::new(),
        total_on_budget: 0,
        total_off_budget: 0,
        net_worth: 0,
    };

    for account in accounts.iter().filter(|a| !a.deleted) {
        snapshot.accounts.push(AccountBalance {
            account_id: account.id.clone(),
            account_name: account.name.clone(),
            account_type: account.account_type.clone(),
            on_budget: account.on_budget,
            closed: account.closed,
            cleared_balance: account.cleared_balance,
            uncleared_balance: account.uncleared_balance,
            current_balance: account.balance,
        });

        if account.closed {
            continue;
        }
        if account.on_budget {
            snapshot.total_on_budget += account.balance;
        } else {
            snapshot.total_off_budget += account.balance;
        }
    }

    snapshot.net_worth = snapshot.total_on_budget + snapshot.total_off_budget;
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use ynab_test_utils::account;

    #[test]
    fn test_closed_accounts_listed_but_not_totalled() {
        let accounts = vec![
            account("a", "Checking", 100_000, true, false),
            account("b", "Brokerage", 50_000, false, false),
            account("c", "Old Card", 99_999, true, true),
        ];

        let snapshot = account_balances(&accounts);
        assert_eq!(snapshot.total_on_budget, 100_000);
        assert_eq!(snapshot.total_off_budget, 50_000);
        assert_eq!(snapshot.net_worth, 150_000);
        assert_eq!(snapshot.accounts.len(), 3);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total_on_budget"], 100.0);
        assert_eq!(json["total_off_budget"], 50.0);
        assert_eq!(json["net_worth"], 150.0);
        assert_eq!(json["accounts"][2]["current_balance"], 99.999);
        assert_eq!(json["accounts"][2]["closed"], true);
    }

    #[test]
    fn test_deleted_accounts_dropped() {
        let mut gone = account("x", "Gone", 5_000, true, false);
        gone.deleted = true;

        let snapshot = account_balances(&[gone]);
        assert!(snapshot.accounts.is_empty());
        assert_eq!(snapshot.net_worth, 0);
    }

    #[test]
    fn test_negative_balances_reduce_net_worth() {
        let accounts = vec![
            account("a", "Checking", 250_000, true, false),
            account("b", "Visa", -75_500, true, false),
            account("c", "Mortgage", -100_000_000, false, false),
        ];
        let snapshot = account_balances(&accounts);
        assert_eq!(snapshot.total_on_budget, 174_500);
        assert_eq!(snapshot.net_worth, 174_500 - 100_000_000);
    }
}

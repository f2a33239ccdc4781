//! Account endpoints.

use ynab_types::Account;

use crate::client::YnabClient;
use crate::envelope::AccountsData;
use crate::error::{ClientError, ClientResult};

impl YnabClient {
    /// List accounts, including closed and deleted ones.
    pub async fn list_accounts(&self, budget_id: &str) -> ClientResult<Vec<Account>> {
        let data: AccountsData = self
            .get(&["budgets", budget_id, "accounts"], &[])
            .await?;
        Ok(data.accounts)
    }

    /// Find one account by ID in the account list.
    pub async fn get_account(&self, budget_id: &str, account_id: &str) -> ClientResult<Account> {
        self.list_accounts(budget_id)
            .await?
            .into_iter()
            .find(|a| a.id == account_id)
            .ok_or_else(|| ClientError::not_found("account", account_id))
    }
}

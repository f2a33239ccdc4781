//! Budget endpoints.

use tracing::debug;
use ynab_types::{Budget, BudgetSummary};

use crate::client::YnabClient;
use crate::envelope::{BudgetData, BudgetsData};
use crate::error::ClientResult;

impl YnabClient {
    /// List every budget the token can see.
    pub async fn list_budgets(&self) -> ClientResult<Vec<BudgetSummary>> {
        let data: BudgetsData = self.get(&["budgets"], &[]).await?;
        debug!(count = data.budgets.len(), "Fetched budgets");
        Ok(data.budgets)
    }

    /// Full budget export including accounts, categories and payees.
    pub async fn get_budget(&self, budget_id: &str) -> ClientResult<Budget> {
        let data: BudgetData = self.get(&["budgets", budget_id], &[]).await?;
        Ok(data.budget)
    }
}

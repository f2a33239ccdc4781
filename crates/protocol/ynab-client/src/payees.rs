//! Payee endpoints.

use ynab_types::Payee;

use crate::client::YnabClient;
use crate::envelope::PayeesData;
use crate::error::{ClientError, ClientResult};

impl YnabClient {
    pub async fn list_payees(&self, budget_id: &str) -> ClientResult<Vec<Payee>> {
        let data: PayeesData = self
            .get(&["budgets", budget_id, "payees"], &[])
            .await?;
        Ok(data.payees)
    }

    /// Find one payee by ID in the payee list.
    pub async fn get_payee(&self, budget_id: &str, payee_id: &str) -> ClientResult<Payee> {
        self.list_payees(budget_id)
            .await?
            .into_iter()
            .find(|p| p.id == payee_id)
            .ok_or_else(|| ClientError::not_found("payee", payee_id))
    }
}

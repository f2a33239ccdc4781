//! Transaction endpoints.

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};
use ynab_types::{ClearedStatus, FlagColor, Milliunits, Transaction, TransactionKind, DATE_FORMAT};

use crate::client::YnabClient;
use crate::envelope::{TransactionBody, TransactionData, TransactionsData};
use crate::error::{ClientError, ClientResult};

/// Server-side filters for the transaction list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Only transactions on or after this date
    pub since_date: Option<NaiveDate>,
    /// Only uncategorized or unapproved transactions
    pub kind: Option<TransactionKind>,
}

impl TransactionQuery {
    pub fn since(date: NaiveDate) -> Self {
        Self {
            since_date: Some(date),
            kind: None,
        }
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Query-string pairs; absent filters are not sent.
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(date) = self.since_date {
            pairs.push(("since_date", date.format(DATE_FORMAT).to_string()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.as_str().to_string()));
        }
        pairs
    }
}

/// Fields for a new transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewTransaction {
    pub account_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub amount: Milliunits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<ClearedStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_color: Option<FlagColor>,
}

impl NewTransaction {
    fn validate(&self) -> ClientResult<()> {
        if self.account_id.trim().is_empty() {
            return Err(ClientError::validation("account_id is required"));
        }
        check_date(&self.date)
    }
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Milliunits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<ClearedStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_color: Option<FlagColor>,
}

impl TransactionUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn validate(&self) -> ClientResult<()> {
        if self.is_empty() {
            return Err(ClientError::validation("no fields to update"));
        }
        match &self.date {
            Some(date) => check_date(date),
            None => Ok(()),
        }
    }
}

fn check_date(date: &str) -> ClientResult<()> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ClientError::validation(format!("invalid date '{}', expected YYYY-MM-DD", date)))
}

impl YnabClient {
    /// List transactions across all accounts.
    pub async fn list_transactions(
        &self,
        budget_id: &str,
        query: &TransactionQuery,
    ) -> ClientResult<Vec<Transaction>> {
        let data: TransactionsData = self
            .get(
                &["budgets", budget_id, "transactions"],
                &query.to_pairs(),
            )
            .await?;
        debug!(count = data.transactions.len(), "Fetched transactions");
        Ok(data.transactions)
    }

    /// List transactions of one account.
    pub async fn list_account_transactions(
        &self,
        budget_id: &str,
        account_id: &str,
        query: &TransactionQuery,
    ) -> ClientResult<Vec<Transaction>> {
        let data: TransactionsData = self
            .get(
                &["budgets", budget_id, "accounts", account_id, "transactions"],
                &query.to_pairs(),
            )
            .await?;
        Ok(data.transactions)
    }

    pub async fn get_transaction(
        &self,
        budget_id: &str,
        transaction_id: &str,
    ) -> ClientResult<Transaction> {
        let data: TransactionData = self
            .get(
                &["budgets", budget_id, "transactions", transaction_id],
                &[],
            )
            .await?;
        Ok(data.transaction)
    }

    /// Create a transaction and return the stored record.
    pub async fn create_transaction(
        &self,
        budget_id: &str,
        transaction: &NewTransaction,
    ) -> ClientResult<Transaction> {
        transaction.validate()?;
        let data: TransactionData = self
            .send(
                Method::POST,
                &["budgets", budget_id, "transactions"],
                &TransactionBody { transaction },
            )
            .await?;
        info!(transaction_id = %data.transaction.id, "Created transaction");
        Ok(data.transaction)
    }

    /// Apply a partial update and return the stored record.
    pub async fn update_transaction(
        &self,
        budget_id: &str,
        transaction_id: &str,
        update: &TransactionUpdate,
    ) -> ClientResult<Transaction> {
        update.validate()?;
        let data: TransactionData = self
            .send(
                Method::PUT,
                &["budgets", budget_id, "transactions", transaction_id],
                &TransactionBody {
                    transaction: update,
                },
            )
            .await?;
        info!(transaction_id, "Updated transaction");
        Ok(data.transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_absent_filters() {
        assert!(TransactionQuery::default().to_pairs().is_empty());

        let query = TransactionQuery::since(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
            .kind(TransactionKind::Unapproved);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("since_date", "2024-01-05".to_string()),
                ("type", "unapproved".to_string())
            ]
        );
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = TransactionUpdate {
            memo: Some("coffee".into()),
            cleared: Some(ClearedStatus::Cleared),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"memo": "coffee", "cleared": "cleared"}));
    }

    #[test]
    fn test_empty_update_rejected() {
        assert!(TransactionUpdate::default().validate().is_err());
    }

    #[test]
    fn test_new_transaction_validation() {
        let mut tx = NewTransaction {
            account_id: "acct-1".into(),
            date: "2024-02-30".into(),
            amount: -1000,
            ..Default::default()
        };
        assert!(tx.validate().is_err());

        tx.date = "2024-02-29".into();
        assert!(tx.validate().is_ok());

        tx.account_id = String::new();
        assert!(tx.validate().is_err());
    }
}

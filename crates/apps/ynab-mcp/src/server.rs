//! MCP server implementation for YNAB.
//!
//! Uses the RMCP SDK to expose budgets, accounts, categories, payees and
//! transactions to AI assistants, plus aggregation tools that summarize
//! spending without returning every transaction.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use ynab_client::{NewTransaction, TransactionQuery, TransactionUpdate, YnabClient};
use ynab_insights::{
    account_balances, aggregate_by_category, aggregate_by_month, aggregate_by_month_in_category,
    budget_overview, filter_until, last_n_months, month_key, monthly_averages, parse_date,
    parse_month, top_payees, validate_date_range, BudgetOverview, Totals, DEFAULT_TOP_N,
    MAX_MONTHS, MIN_MONTHS,
};
use ynab_types::{
    float_to_milliunits, milliunits_to_float, ClearedStatus, Transaction, TransactionKind,
    DATE_FORMAT,
};

use crate::error::{require, ToolError, ToolResult};
use crate::tools::{
    non_blank, AccountBalancesOutput, AccountInfo, AccountInput, BudgetDetailsOutput, BudgetInfo,
    BudgetInput, BudgetSummaryInput, CategoryDetailsOutput, CategoryGroupInfo, CategoryInfo,
    CategoryInput, CreateTransactionInput, ListAccountsOutput, ListBudgetsOutput,
    ListCategoriesOutput, ListPayeesOutput, ListTransactionsInput, ListTransactionsOutput,
    PayeeInfo, PayeeInput, PayeeSummaryInput, PayeeSummaryOutput, SpendingByCategoryInput,
    SpendingByCategoryOutput, SpendingByMonthInput, SpendingByMonthOutput, TransactionInfo,
    TransactionInput, UpdateTransactionInput, MAX_LISTED_TRANSACTIONS,
};

/// Name reported when spending is not filtered by category.
const ALL_CATEGORIES: &str = "All Categories";

/// Create a standardized error response for MCP tools.
///
/// Returns a JSON-formatted error with error code, message, and recovery suggestion.
pub fn tool_error(error: &ToolError) -> CallToolResult {
    let code = error.error_code();
    let response = serde_json::json!({
        "error": code.to_string(),
        "code": code.code(),
        "message": error.to_string(),
        "suggestion": error.suggestion(),
    });
    CallToolResult::error(vec![Content::text(response.to_string())])
}

/// Turn a tool body's result into an MCP response.
fn respond<T: Serialize>(tool: &str, result: ToolResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(output) => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Err(e) => {
            warn!(tool, code = %e.error_code(), error = %e, "Tool call failed");
            Ok(tool_error(&e))
        }
    }
}

/// YNAB MCP Server.
///
/// Cheap to clone; every clone shares the same upstream client.
#[derive(Clone)]
pub struct YnabMcpServer {
    /// Upstream API client.
    client: Arc<YnabClient>,
    /// Fixed "today" for month defaults; the local date when unset.
    today: Option<NaiveDate>,
    /// Tool router for MCP.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl YnabMcpServer {
    /// Create a new MCP server around a configured client.
    pub fn new(client: YnabClient) -> Self {
        Self {
            client: Arc::new(client),
            today: None,
            tool_router: Self::tool_router(),
        }
    }

    /// Pin the date used for "current month" defaults.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The shared upstream client.
    pub fn client(&self) -> &YnabClient {
        &self.client
    }

    // ------------------------------------------------------------------------
    // Budgets
    // ------------------------------------------------------------------------

    #[tool(
        description = "List all YNAB budgets accessible with the current token. Returns budget ID, name, and last modified date for each budget."
    )]
    async fn list_budgets(&self) -> Result<CallToolResult, McpError> {
        debug!("Processing list_budgets request");
        respond("list_budgets", self.handle_list_budgets().await)
    }

    #[tool(
        description = "Get detailed information about a specific budget including accounts, categories, and payees. Requires a budget ID from list_budgets."
    )]
    async fn get_budget_details(
        &self,
        Parameters(input): Parameters<BudgetInput>,
    ) -> Result<CallToolResult, McpError> {
        debug!(budget_id = %input.budget_id, "Processing get_budget_details request");
        respond(
            "get_budget_details",
            self.handle_get_budget_details(&input).await,
        )
    }

    // ------------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------------

    #[tool(
        description = "List all accounts in a budget. Shows account name, type, balance, and status (open/closed, on/off budget)."
    )]
    async fn list_accounts(
        &self,
        Parameters(input): Parameters<BudgetInput>,
    ) -> Result<CallToolResult, McpError> {
        respond("list_accounts", self.handle_list_accounts(&input).await)
    }

    #[tool(
        description = "Get detailed information about a specific account including balance breakdown and account settings."
    )]
    async fn get_account_details(
        &self,
        Parameters(input): Parameters<AccountInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_account_details",
            self.handle_get_account_details(&input).await,
        )
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    #[tool(
        description = "List transactions in a budget. Can filter by date (since_date), type (uncategorized/unapproved) or account. Returns the 50 most recent matches and a count of the rest."
    )]
    async fn list_transactions(
        &self,
        Parameters(input): Parameters<ListTransactionsInput>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            budget_id = %input.budget_id,
            since_date = ?input.since_date,
            kind = ?input.kind,
            "Processing list_transactions request"
        );
        respond(
            "list_transactions",
            self.handle_list_transactions(&input).await,
        )
    }

    #[tool(
        description = "Get detailed information about a specific transaction including all fields and any subtransactions (splits)."
    )]
    async fn get_transaction_details(
        &self,
        Parameters(input): Parameters<TransactionInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_transaction_details",
            self.handle_get_transaction_details(&input).await,
        )
    }

    #[tool(
        description = "Create a new transaction in a budget. Requires account_id and amount (negative for spending); date defaults to today. Optionally specify payee, category, memo and cleared status."
    )]
    async fn create_transaction(
        &self,
        Parameters(input): Parameters<CreateTransactionInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "create_transaction",
            self.handle_create_transaction(&input).await,
        )
    }

    #[tool(
        description = "Update an existing transaction. Specify only the fields you want to change. All fields are optional except budget_id and transaction_id. Blank text fields are ignored, so a memo or payee cannot be cleared."
    )]
    async fn update_transaction(
        &self,
        Parameters(input): Parameters<UpdateTransactionInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "update_transaction",
            self.handle_update_transaction(&input).await,
        )
    }

    // ------------------------------------------------------------------------
    // Categories and payees
    // ------------------------------------------------------------------------

    #[tool(
        description = "List all category groups and their categories in a budget. Shows budgeted amounts, activity, and balances for each category."
    )]
    async fn list_categories(
        &self,
        Parameters(input): Parameters<BudgetInput>,
    ) -> Result<CallToolResult, McpError> {
        respond("list_categories", self.handle_list_categories(&input).await)
    }

    #[tool(
        description = "Get detailed information about a specific category including budget, activity, balance, and goal information. Pass month (YYYY-MM) for a specific month's figures."
    )]
    async fn get_category_details(
        &self,
        Parameters(input): Parameters<CategoryInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_category_details",
            self.handle_get_category_details(&input).await,
        )
    }

    #[tool(
        description = "List all payees in a budget. Payees are the people or entities you pay money to or receive money from."
    )]
    async fn list_payees(
        &self,
        Parameters(input): Parameters<BudgetInput>,
    ) -> Result<CallToolResult, McpError> {
        respond("list_payees", self.handle_list_payees(&input).await)
    }

    #[tool(description = "Get details about a specific payee.")]
    async fn get_payee_details(
        &self,
        Parameters(input): Parameters<PayeeInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_payee_details",
            self.handle_get_payee_details(&input).await,
        )
    }

    // ------------------------------------------------------------------------
    // Aggregations
    // ------------------------------------------------------------------------

    #[tool(
        description = "Get total spending per category for a date range (at most two years). Returns aggregated data without fetching every transaction individually. Transfers between accounts are excluded."
    )]
    async fn get_spending_by_category(
        &self,
        Parameters(input): Parameters<SpendingByCategoryInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_spending_by_category",
            self.handle_spending_by_category(&input).await,
        )
    }

    #[tool(
        description = "Get monthly spending totals for trend analysis. Returns aggregated spending for the last N months (1-24), optionally for a single category."
    )]
    async fn get_spending_by_month(
        &self,
        Parameters(input): Parameters<SpendingByMonthInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_spending_by_month",
            self.handle_spending_by_month(&input).await,
        )
    }

    #[tool(
        description = "See where money is going by payee. Returns top payees by spending for a date range."
    )]
    async fn get_payee_summary(
        &self,
        Parameters(input): Parameters<PayeeSummaryInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_payee_summary",
            self.handle_payee_summary(&input).await,
        )
    }

    #[tool(
        description = "Get budget state showing budgeted vs actual for all visible categories in a month, plus money left to budget and age of money."
    )]
    async fn get_budget_summary(
        &self,
        Parameters(input): Parameters<BudgetSummaryInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_budget_summary",
            self.handle_budget_summary(&input).await,
        )
    }

    #[tool(
        description = "Quick snapshot of all account balances. Returns current balances for all accounts with on-budget, off-budget and net worth totals. Closed accounts are listed but not totalled."
    )]
    async fn get_account_balances(
        &self,
        Parameters(input): Parameters<BudgetInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_account_balances",
            self.handle_account_balances(&input).await,
        )
    }
}

// ============================================================================
// Tool bodies
// ============================================================================

impl YnabMcpServer {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Fetch transactions since `since`, across the budget or for one account.
    async fn fetch_since(
        &self,
        budget_id: &str,
        account_id: Option<&str>,
        since: NaiveDate,
    ) -> ToolResult<Vec<Transaction>> {
        let query = TransactionQuery::since(since);
        let transactions = match account_id {
            Some(account_id) => {
                self.client.list_account_transactions(budget_id, account_id, &query).await?
            }
            None => self.client.list_transactions(budget_id, &query).await?,
        };
        Ok(transactions)
    }

    pub async fn handle_list_budgets(&self) -> ToolResult<ListBudgetsOutput> {
        let budgets = self.client.list_budgets().await?;
        info!(count = budgets.len(), "Listed budgets");
        Ok(ListBudgetsOutput {
            budgets: budgets.iter().map(BudgetInfo::from).collect(),
        })
    }

    pub async fn handle_get_budget_details(
        &self,
        input: &BudgetInput,
    ) -> ToolResult<BudgetDetailsOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let budget = self.client.get_budget(budget_id).await?;

        let accounts: Vec<AccountInfo> = budget
            .accounts
            .iter()
            .filter(|a| !a.deleted)
            .map(AccountInfo::from)
            .collect();

        Ok(BudgetDetailsOutput {
            budget: BudgetInfo::from(&budget),
            currency_format: budget.currency_format.clone(),
            account_count: accounts.len(),
            category_count: budget.categories.iter().filter(|c| !c.deleted).count(),
            payee_count: budget.payees.iter().filter(|p| p.is_active()).count(),
            accounts,
        })
    }

    pub async fn handle_list_accounts(&self, input: &BudgetInput) -> ToolResult<ListAccountsOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let accounts = self.client.list_accounts(budget_id).await?;
        Ok(ListAccountsOutput {
            accounts: accounts
                .iter()
                .filter(|a| !a.deleted)
                .map(AccountInfo::from)
                .collect(),
        })
    }

    pub async fn handle_get_account_details(&self, input: &AccountInput) -> ToolResult<AccountInfo> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let account_id = require("account_id", &input.account_id)?;
        let account = self.client.get_account(budget_id, account_id).await?;
        Ok(AccountInfo::from(&account))
    }

    pub async fn handle_list_transactions(
        &self,
        input: &ListTransactionsInput,
    ) -> ToolResult<ListTransactionsOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;

        let mut query = TransactionQuery::default();
        if let Some(since) = non_blank(&input.since_date) {
            query.since_date = Some(parse_date("since_date", since)?);
        }
        if let Some(kind) = non_blank(&input.kind) {
            let kind = TransactionKind::parse(kind).ok_or_else(|| {
                ToolError::invalid(format!(
                    "type must be 'uncategorized' or 'unapproved', got '{}'",
                    kind
                ))
            })?;
            query = query.kind(kind);
        }

        let transactions = match non_blank(&input.account_id) {
            Some(account_id) => {
                self.client.list_account_transactions(budget_id, account_id, &query).await?
            }
            None => self.client.list_transactions(budget_id, &query).await?,
        };

        let mut live: Vec<&Transaction> =
            transactions.iter().filter(|t| t.is_active()).collect();
        // most recent first; ISO dates sort lexically
        live.sort_by(|a, b| b.date.cmp(&a.date));

        let total_count = live.len();
        live.truncate(MAX_LISTED_TRANSACTIONS);
        let total_amount = milliunits_to_float(live.iter().map(|t| t.amount).sum());

        Ok(ListTransactionsOutput {
            total_count,
            remaining_count: total_count - live.len(),
            total_amount,
            transactions: live.into_iter().map(TransactionInfo::from).collect(),
        })
    }

    pub async fn handle_get_transaction_details(
        &self,
        input: &TransactionInput,
    ) -> ToolResult<TransactionInfo> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let transaction_id = require("transaction_id", &input.transaction_id)?;
        let transaction = self.client.get_transaction(budget_id, transaction_id).await?;
        Ok(TransactionInfo::from(&transaction))
    }

    pub async fn handle_create_transaction(
        &self,
        input: &CreateTransactionInput,
    ) -> ToolResult<TransactionInfo> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let account_id = require("account_id", &input.account_id)?;
        let amount = parse_amount(input.amount)?;

        let date = match non_blank(&input.date) {
            Some(date) => parse_date("date", date)?,
            None => self.today(),
        };
        let cleared = match non_blank(&input.cleared) {
            Some(status) => parse_cleared(status)?,
            None => ClearedStatus::Uncleared,
        };

        let new = NewTransaction {
            account_id: account_id.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            amount,
            payee_name: non_blank(&input.payee_name).map(str::to_string),
            category_id: non_blank(&input.category_id).map(str::to_string),
            memo: non_blank(&input.memo).map(str::to_string),
            cleared: Some(cleared),
            approved: Some(true),
            ..Default::default()
        };

        let created = self.client.create_transaction(budget_id, &new).await?;
        Ok(TransactionInfo::from(&created))
    }

    pub async fn handle_update_transaction(
        &self,
        input: &UpdateTransactionInput,
    ) -> ToolResult<TransactionInfo> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let transaction_id = require("transaction_id", &input.transaction_id)?;

        let mut update = TransactionUpdate {
            payee_name: non_blank(&input.payee_name).map(str::to_string),
            category_id: non_blank(&input.category_id).map(str::to_string),
            memo: non_blank(&input.memo).map(str::to_string),
            approved: input.approved,
            ..Default::default()
        };
        if let Some(date) = non_blank(&input.date) {
            update.date = Some(parse_date("date", date)?.format(DATE_FORMAT).to_string());
        }
        if let Some(amount) = input.amount {
            update.amount = Some(parse_amount(amount)?);
        }
        if let Some(status) = non_blank(&input.cleared) {
            update.cleared = Some(parse_cleared(status)?);
        }
        if update.is_empty() {
            return Err(ToolError::invalid(
                "no fields to update; pass at least one of date, amount, payee_name, category_id, memo, cleared, approved",
            ));
        }

        let updated = self.client.update_transaction(budget_id, transaction_id, &update).await?;
        Ok(TransactionInfo::from(&updated))
    }

    pub async fn handle_list_categories(
        &self,
        input: &BudgetInput,
    ) -> ToolResult<ListCategoriesOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let groups = self.client.list_categories(budget_id).await?;
        Ok(ListCategoriesOutput {
            category_groups: groups
                .iter()
                .filter(|g| g.is_active())
                .map(CategoryGroupInfo::from)
                .collect(),
        })
    }

    pub async fn handle_get_category_details(
        &self,
        input: &CategoryInput,
    ) -> ToolResult<CategoryDetailsOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let category_id = require("category_id", &input.category_id)?;

        match non_blank(&input.month) {
            Some(month) => {
                let first_day = parse_month(month)?;
                let category = self
                    .client
                    .get_month_category(
                        budget_id,
                        &first_day.format(DATE_FORMAT).to_string(),
                        category_id,
                    )
                    .await?;
                Ok(CategoryDetailsOutput {
                    month: Some(month_key(first_day)),
                    category: CategoryInfo::from(&category),
                })
            }
            None => {
                let category = self.client.get_category(budget_id, category_id).await?;
                Ok(CategoryDetailsOutput {
                    month: None,
                    category: CategoryInfo::from(&category),
                })
            }
        }
    }

    pub async fn handle_list_payees(&self, input: &BudgetInput) -> ToolResult<ListPayeesOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let payees = self.client.list_payees(budget_id).await?;
        Ok(ListPayeesOutput {
            payees: payees
                .iter()
                .filter(|p| p.is_active())
                .map(PayeeInfo::from)
                .collect(),
        })
    }

    pub async fn handle_get_payee_details(&self, input: &PayeeInput) -> ToolResult<PayeeInfo> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let payee_id = require("payee_id", &input.payee_id)?;
        let payee = self.client.get_payee(budget_id, payee_id).await?;
        Ok(PayeeInfo::from(&payee))
    }

    pub async fn handle_spending_by_category(
        &self,
        input: &SpendingByCategoryInput,
    ) -> ToolResult<SpendingByCategoryOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let range = validate_date_range(&input.since_date, &input.until_date)?;

        let transactions = self
            .fetch_since(budget_id, non_blank(&input.account_id), range.since)
            .await?;
        let transactions = filter_until(transactions, range.until);
        let categories = aggregate_by_category(&transactions);
        let totals = Totals::combine(categories.iter().map(|c| &c.totals));

        info!(
            categories = categories.len(),
            transactions = transactions.len(),
            "Aggregated spending by category"
        );

        Ok(SpendingByCategoryOutput {
            categories,
            total_outflow: milliunits_to_float(totals.total_outflow),
            total_inflow: milliunits_to_float(totals.total_inflow),
            date_range: range,
        })
    }

    pub async fn handle_spending_by_month(
        &self,
        input: &SpendingByMonthInput,
    ) -> ToolResult<SpendingByMonthOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        if input.num_months < i64::from(MIN_MONTHS) || input.num_months > i64::from(MAX_MONTHS) {
            return Err(ToolError::invalid(format!(
                "num_months must be between {} and {}, got {}",
                MIN_MONTHS, MAX_MONTHS, input.num_months
            )));
        }
        let category_id = non_blank(&input.category_id);

        let category_name = match category_id {
            Some(id) => self.client.get_category(budget_id, id).await?.name,
            None => ALL_CATEGORIES.to_string(),
        };

        let months = last_n_months(self.today(), input.num_months as u32);
        let Some(oldest) = months.first() else {
            return Err(ToolError::invalid("empty month window"));
        };
        let since = parse_month(oldest)?;

        let transactions = self
            .fetch_since(budget_id, non_blank(&input.account_id), since)
            .await?;
        let months = match category_id {
            Some(id) => aggregate_by_month_in_category(&transactions, &months, id),
            None => aggregate_by_month(&transactions, &months),
        };
        let (average_monthly_outflow, average_monthly_inflow) = monthly_averages(&months);

        Ok(SpendingByMonthOutput {
            months,
            category_name,
            average_monthly_outflow,
            average_monthly_inflow,
        })
    }

    pub async fn handle_payee_summary(
        &self,
        input: &PayeeSummaryInput,
    ) -> ToolResult<PayeeSummaryOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let range = validate_date_range(&input.since_date, &input.until_date)?;
        let top_n = input
            .top_n
            .map(|n| n.max(1) as usize)
            .unwrap_or(DEFAULT_TOP_N);

        let transactions = self
            .fetch_since(budget_id, non_blank(&input.account_id), range.since)
            .await?;
        let transactions = filter_until(transactions, range.until);

        Ok(PayeeSummaryOutput {
            payees: top_payees(&transactions, top_n),
            date_range: range,
        })
    }

    pub async fn handle_budget_summary(
        &self,
        input: &BudgetSummaryInput,
    ) -> ToolResult<BudgetOverview> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let first_day = match non_blank(&input.month) {
            Some(month) => parse_month(month)?,
            None => parse_month(&month_key(self.today()))?,
        };
        let month_path = first_day.format(DATE_FORMAT).to_string();

        let (groups, month) = tokio::try_join!(
            self.client.list_categories(budget_id),
            self.client.get_month(budget_id, &month_path),
        )?;

        Ok(budget_overview(&groups, &month))
    }

    pub async fn handle_account_balances(
        &self,
        input: &BudgetInput,
    ) -> ToolResult<AccountBalancesOutput> {
        let budget_id = require("budget_id", &input.budget_id)?;
        let accounts = self.client.list_accounts(budget_id).await?;
        Ok(account_balances(&accounts))
    }
}

fn parse_amount(amount: f64) -> ToolResult<i64> {
    if !amount.is_finite() {
        return Err(ToolError::invalid("amount must be a finite number"));
    }
    Ok(float_to_milliunits(amount))
}

fn parse_cleared(status: &str) -> ToolResult<ClearedStatus> {
    ClearedStatus::parse(status).ok_or_else(|| {
        ToolError::invalid(format!(
            "cleared must be 'cleared', 'uncleared' or 'reconciled', got '{}'",
            status
        ))
    })
}

#[tool_handler]
impl rmcp::ServerHandler for YnabMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "YNAB MCP Server - Read and update a YNAB budget. Start with `list_budgets` to \
                 find a budget ID. Prefer the aggregation tools (`get_spending_by_category`, \
                 `get_spending_by_month`, `get_payee_summary`, `get_budget_summary`, \
                 `get_account_balances`) over listing raw transactions. Amounts are in currency \
                 units; negative amounts are outflows."
                    .into(),
            ),
        }
    }
}

/// Run the MCP server on stdio until the client disconnects.
pub async fn run_stdio(server: YnabMcpServer) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting YNAB MCP server on stdio");

    let cancel = server.client().cancellation_token().clone();

    // A transport that fails during setup (e.g. stdin already closed) is a
    // clean exit.
    let service = match server.serve(stdio()).await {
        Ok(s) => s,
        Err(e) => {
            info!("MCP transport closed during setup: {}", e);
            return Ok(());
        }
    };

    tokio::select! {
        result = service.waiting() => {
            if let Err(e) = result {
                info!("MCP transport closed: {}", e);
            }
        }
        _ = cancel.cancelled() => {
            info!("Shutdown requested, stopping stdio server");
        }
    }

    Ok(())
}

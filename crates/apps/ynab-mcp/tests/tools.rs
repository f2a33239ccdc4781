//! Tool bodies end to end against a scripted upstream.

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::{json, Value};
use ynab_client::{ClientConfig, RetryConfig, YnabClient};
use ynab_mcp::tools::{
    BudgetInput, BudgetSummaryInput, CategoryInput, CreateTransactionInput, ListTransactionsInput,
    PayeeSummaryInput, SpendingByCategoryInput, SpendingByMonthInput, TransactionInput,
    UpdateTransactionInput,
};
use ynab_mcp::{tool_error, ErrorCode, ToolError, YnabMcpServer};
use ynab_test_utils::{
    account, budget_month, category, category_group, payee, split_line, MockResponse,
    MockUpstream, TransactionBuilder,
};

const TXS: &str = "/budgets/b1/transactions";

fn server_for(mock: &MockUpstream) -> YnabMcpServer {
    let retry = RetryConfig {
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        ..Default::default()
    };
    let client = YnabClient::new(
        "test-token",
        ClientConfig::with_base_url(mock.base_url()).retry(retry),
    )
    .unwrap();
    YnabMcpServer::new(client).with_today(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

fn budget(id: &str) -> BudgetInput {
    BudgetInput {
        budget_id: id.to_string(),
    }
}

fn transactions_json(txs: Vec<ynab_types::Transaction>) -> Value {
    json!({ "transactions": txs })
}

#[tokio::test]
async fn test_list_accounts_hides_deleted() {
    let mock = MockUpstream::start().await.unwrap();
    let mut gone = account("a2", "Old", 0, true, false);
    gone.deleted = true;
    mock.on_get(
        "/budgets/b1/accounts",
        json!({ "accounts": [account("a1", "Checking", 1_500_000, true, false), gone] }),
    );

    let output = server_for(&mock)
        .handle_list_accounts(&budget("b1"))
        .await
        .unwrap();
    assert_eq!(output.accounts.len(), 1);
    assert_eq!(output.accounts[0].balance, 1500.0);
}

#[tokio::test]
async fn test_list_transactions_caps_at_fifty() {
    let mock = MockUpstream::start().await.unwrap();
    let txs: Vec<_> = (0..60)
        .map(|i| {
            TransactionBuilder::new(&format!("t{}", i))
                .date(&format!("2024-01-{:02}", i % 28 + 1))
                .amount(-1_000)
                .build()
        })
        .collect();
    mock.on_get(TXS, transactions_json(txs));

    let output = server_for(&mock)
        .handle_list_transactions(&ListTransactionsInput {
            budget_id: "b1".into(),
            since_date: Some("2024-01-01".into()),
            kind: Some("unapproved".into()),
            account_id: None,
        })
        .await
        .unwrap();

    assert_eq!(output.total_count, 60);
    assert_eq!(output.remaining_count, 10);
    assert_eq!(output.transactions.len(), 50);
    assert_eq!(output.total_amount, -50.0);
    assert_eq!(output.transactions[0].date, "2024-01-28");

    let request = mock.last_request(TXS).unwrap();
    assert_eq!(
        request.query.as_deref(),
        Some("since_date=2024-01-01&type=unapproved")
    );
}

#[tokio::test]
async fn test_list_transactions_for_account_uses_account_route() {
    let mock = MockUpstream::start().await.unwrap();
    mock.on_get(
        "/budgets/b1/accounts/a1/transactions",
        transactions_json(vec![
            TransactionBuilder::new("t1").build(),
            TransactionBuilder::new("t2").deleted().build(),
        ]),
    );

    let output = server_for(&mock)
        .handle_list_transactions(&ListTransactionsInput {
            budget_id: "b1".into(),
            since_date: None,
            kind: None,
            account_id: Some("a1".into()),
        })
        .await
        .unwrap();
    assert_eq!(output.total_count, 1);
    assert_eq!(mock.request_count(TXS), 0);
}

#[tokio::test]
async fn test_invalid_type_filter_never_sent() {
    let mock = MockUpstream::start().await.unwrap();
    let err = server_for(&mock)
        .handle_list_transactions(&ListTransactionsInput {
            budget_id: "b1".into(),
            since_date: None,
            kind: Some("pending".into()),
            account_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::InvalidInput);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_transaction_not_found_surfaces_detail() {
    let mock = MockUpstream::start().await.unwrap();
    mock.on(
        "GET",
        "/budgets/b1/transactions/missing",
        MockResponse::error(404, "transaction not found"),
    );

    let err = server_for(&mock)
        .handle_get_transaction_details(&TransactionInput {
            budget_id: "b1".into(),
            transaction_id: "missing".into(),
        })
        .await
        .unwrap_err();

    let result = tool_error(&err);
    let text = result.content[0].as_text().unwrap().text.clone();
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["error"], "not_found");
    assert_eq!(payload["message"], "404: transaction not found");
    assert_eq!(mock.request_count("/budgets/b1/transactions/missing"), 1);
}

#[tokio::test]
async fn test_create_transaction_defaults() {
    let mock = MockUpstream::start().await.unwrap();
    let stored = TransactionBuilder::new("new-1")
        .date("2024-03-15")
        .amount(-45_670)
        .payee("p1", "Grocer")
        .build();
    mock.on("POST", TXS, MockResponse::created(json!({ "transaction": stored })));

    let output = server_for(&mock)
        .handle_create_transaction(&CreateTransactionInput {
            budget_id: "b1".into(),
            account_id: "acct-checking".into(),
            amount: -45.67,
            date: None,
            payee_name: Some("Grocer".into()),
            category_id: Some("".into()),
            memo: None,
            cleared: None,
        })
        .await
        .unwrap();
    assert_eq!(output.id, "new-1");
    assert_eq!(output.amount, -45.67);

    let body = mock.last_request(TXS).unwrap().body.unwrap();
    let tx = &body["transaction"];
    assert_eq!(tx["amount"], -45_670);
    assert_eq!(tx["date"], "2024-03-15");
    assert_eq!(tx["cleared"], "uncleared");
    assert_eq!(tx["approved"], true);
    assert_eq!(tx["payee_name"], "Grocer");
    assert!(tx.get("category_id").is_none());
}

#[tokio::test]
async fn test_create_transaction_rejects_bad_date() {
    let mock = MockUpstream::start().await.unwrap();
    let err = server_for(&mock)
        .handle_create_transaction(&CreateTransactionInput {
            budget_id: "b1".into(),
            account_id: "a1".into(),
            amount: 10.0,
            date: Some("03/15/2024".into()),
            payee_name: None,
            category_id: None,
            memo: None,
            cleared: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Insights(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_update_transaction_sends_only_given_fields() {
    let mock = MockUpstream::start().await.unwrap();
    let path = "/budgets/b1/transactions/t1";
    let stored = TransactionBuilder::new("t1").memo("coffee").build();
    mock.on("PUT", path, MockResponse::data(json!({ "transaction": stored })));

    server_for(&mock)
        .handle_update_transaction(&UpdateTransactionInput {
            budget_id: "b1".into(),
            transaction_id: "t1".into(),
            date: None,
            amount: None,
            payee_name: None,
            category_id: None,
            memo: Some("coffee".into()),
            cleared: Some("cleared".into()),
            approved: None,
        })
        .await
        .unwrap();

    let body = mock.last_request(path).unwrap().body.unwrap();
    assert_eq!(body, json!({ "transaction": { "memo": "coffee", "cleared": "cleared" } }));
}

#[tokio::test]
async fn test_update_transaction_blank_text_leaves_field_unchanged() {
    let mock = MockUpstream::start().await.unwrap();
    let path = "/budgets/b1/transactions/t1";
    let stored = TransactionBuilder::new("t1").memo("coffee").build();
    mock.on("PUT", path, MockResponse::data(json!({ "transaction": stored })));

    server_for(&mock)
        .handle_update_transaction(&UpdateTransactionInput {
            budget_id: "b1".into(),
            transaction_id: "t1".into(),
            date: None,
            amount: None,
            payee_name: Some("  ".into()),
            category_id: None,
            memo: Some(String::new()),
            cleared: None,
            approved: Some(true),
        })
        .await
        .unwrap();

    let body = mock.last_request(path).unwrap().body.unwrap();
    assert_eq!(body, json!({ "transaction": { "approved": true } }));
}

#[tokio::test]
async fn test_padded_ids_are_trimmed_before_use() {
    let mock = MockUpstream::start().await.unwrap();
    let path = "/budgets/b1/transactions/t1";
    mock.on_get(path, json!({ "transaction": TransactionBuilder::new("t1").build() }));

    let output = server_for(&mock)
        .handle_get_transaction_details(&TransactionInput {
            budget_id: " b1 ".into(),
            transaction_id: "t1\n".into(),
        })
        .await
        .unwrap();
    assert_eq!(output.id, "t1");
    assert_eq!(mock.request_count(path), 1);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_category_details_month_scoped() {
    let mock = MockUpstream::start().await.unwrap();
    let mut cat = category("c1", "Groceries", "g1", 400_000, -123_450);
    cat.goal_target = Some(500_000);
    mock.on_get(
        "/budgets/b1/months/2024-02-01/categories/c1",
        json!({ "category": cat }),
    );

    let output = server_for(&mock)
        .handle_get_category_details(&CategoryInput {
            budget_id: "b1".into(),
            category_id: "c1".into(),
            month: Some("2024-02".into()),
        })
        .await
        .unwrap();
    assert_eq!(output.month.as_deref(), Some("2024-02"));
    assert_eq!(output.category.available, 276.55);
    assert_eq!(output.category.goal_target, Some(500.0));
}

#[tokio::test]
async fn test_spending_by_category_filters_until() {
    let mock = MockUpstream::start().await.unwrap();
    mock.on_get(
        TXS,
        transactions_json(vec![
            TransactionBuilder::new("t1")
                .date("2024-01-10")
                .amount(-30_000)
                .category("c-food", "Food")
                .build(),
            TransactionBuilder::new("t2")
                .date("2024-01-20")
                .amount(-10_000)
                .transfer_to("acct-savings")
                .build(),
            TransactionBuilder::new("t3")
                .date("2024-02-10")
                .amount(-99_000)
                .category("c-food", "Food")
                .build(),
        ]),
    );

    let output = server_for(&mock)
        .handle_spending_by_category(&SpendingByCategoryInput {
            budget_id: "b1".into(),
            since_date: "2024-01-01".into(),
            until_date: "2024-01-31".into(),
            account_id: None,
        })
        .await
        .unwrap();

    assert_eq!(output.categories.len(), 1);
    assert_eq!(output.total_outflow, 30.0);
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["date_range"]["since"], "2024-01-01");
    assert_eq!(json["date_range"]["until"], "2024-01-31");
    assert_eq!(
        mock.last_request(TXS).unwrap().query.as_deref(),
        Some("since_date=2024-01-01")
    );
}

#[tokio::test]
async fn test_spending_by_category_range_rejected_before_fetch() {
    let mock = MockUpstream::start().await.unwrap();
    let err = server_for(&mock)
        .handle_spending_by_category(&SpendingByCategoryInput {
            budget_id: "b1".into(),
            since_date: "2022-01-01".into(),
            until_date: "2024-06-01".into(),
            account_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::InvalidInput);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_spending_by_month_with_category() {
    let mock = MockUpstream::start().await.unwrap();
    mock.on_get(
        "/budgets/b1/categories",
        json!({ "category_groups": [category_group("g1", "Everyday", vec![
            category("c-food", "Food", "g1", 0, 0),
        ])] }),
    );
    mock.on_get(
        TXS,
        transactions_json(vec![
            TransactionBuilder::new("t1")
                .date("2024-02-03")
                .amount(-20_000)
                .category("c-food", "Food")
                .build(),
            TransactionBuilder::new("t2")
                .date("2024-03-03")
                .amount(-5_000)
                .split(split_line("s1", -4_000, "c-food", "Food"))
                .split(split_line("s2", -1_000, "c-other", "Other"))
                .build(),
        ]),
    );

    let output = server_for(&mock)
        .handle_spending_by_month(&SpendingByMonthInput {
            budget_id: "b1".into(),
            num_months: 3,
            category_id: Some("c-food".into()),
            account_id: None,
        })
        .await
        .unwrap();

    assert_eq!(output.category_name, "Food");
    let months: Vec<&str> = output.months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
    assert_eq!(output.months[1].totals.total_outflow, 20_000);
    assert_eq!(output.months[2].totals.total_outflow, 4_000);
    assert_eq!(output.average_monthly_outflow, 8.0);
    assert_eq!(
        mock.last_request(TXS).unwrap().query.as_deref(),
        Some("since_date=2024-01-01")
    );
}

#[tokio::test]
async fn test_payee_summary_top_n() {
    let mock = MockUpstream::start().await.unwrap();
    mock.on_get(
        "/budgets/b1/accounts/a1/transactions",
        transactions_json(vec![
            TransactionBuilder::new("t1")
                .date("2024-01-05")
                .amount(-5_000)
                .payee("p1", "Cafe")
                .build(),
            TransactionBuilder::new("t2")
                .date("2024-01-06")
                .amount(-50_000)
                .payee("p2", "Landlord")
                .build(),
        ]),
    );

    let output = server_for(&mock)
        .handle_payee_summary(&PayeeSummaryInput {
            budget_id: "b1".into(),
            since_date: "2024-01-01".into(),
            until_date: "2024-01-31".into(),
            top_n: Some(0),
            account_id: Some("a1".into()),
        })
        .await
        .unwrap();
    assert_eq!(output.payees.len(), 1);
    assert_eq!(output.payees[0].payee_name, "Landlord");
}

#[tokio::test]
async fn test_budget_summary_merges_structure_and_month() {
    let mock = MockUpstream::start().await.unwrap();
    let mut hidden = category("c-hidden", "Hidden", "g1", 0, 0);
    hidden.hidden = true;
    mock.on_get(
        "/budgets/b1/categories",
        json!({ "category_groups": [category_group("g1", "Bills", vec![
            category("c-rent", "Rent", "g1", 0, 0),
            hidden,
        ])] }),
    );
    let mut month = budget_month(
        "2024-03-01",
        125_000,
        vec![category("c-rent", "Rent", "g1", 1_000_000, -1_000_000)],
    );
    month.age_of_money = Some(21);
    mock.on_get("/budgets/b1/months/2024-03-01", json!({ "month": month }));

    let output = server_for(&mock)
        .handle_budget_summary(&BudgetSummaryInput {
            budget_id: "b1".into(),
            month: None,
        })
        .await
        .unwrap();

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["month"], "2024-03");
    assert_eq!(json["to_be_budgeted"], 125.0);
    assert_eq!(json["age_of_money"], 21);
    let categories = json["category_groups"][0]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["budgeted"], 1000.0);
}

#[tokio::test]
async fn test_account_balances_snapshot() {
    let mock = MockUpstream::start().await.unwrap();
    mock.on_get(
        "/budgets/b1/accounts",
        json!({ "accounts": [
            account("a", "Checking", 100_000, true, false),
            account("b", "Brokerage", 50_000, false, false),
            account("c", "Old Card", 99_999, true, true),
        ] }),
    );

    let output = server_for(&mock)
        .handle_account_balances(&budget("b1"))
        .await
        .unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["total_on_budget"], 100.0);
    assert_eq!(json["total_off_budget"], 50.0);
    assert_eq!(json["net_worth"], 150.0);
}

#[tokio::test]
async fn test_list_payees_hides_deleted() {
    let mock = MockUpstream::start().await.unwrap();
    let mut gone = payee("p2", "Gone");
    gone.deleted = true;
    mock.on_get("/budgets/b1/payees", json!({ "payees": [payee("p1", "Cafe"), gone] }));

    let output = server_for(&mock)
        .handle_list_payees(&budget("b1"))
        .await
        .unwrap();
    assert_eq!(output.payees.len(), 1);
    assert_eq!(output.payees[0].name, "Cafe");
}

#[tokio::test]
async fn test_rate_limit_exhaustion_reported() {
    let mock = MockUpstream::start().await.unwrap();
    mock.on("GET", "/budgets", MockResponse::status(429));

    let err = server_for(&mock).handle_list_budgets().await.unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::RateLimited);
    assert_eq!(mock.request_count("/budgets"), 3);
}

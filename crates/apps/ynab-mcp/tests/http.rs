//! HTTP transport: health, root page and bearer auth on `/mcp`.

use std::net::SocketAddr;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use ynab_client::{ClientConfig, YnabClient};
use ynab_mcp::http::{spawn_with_listener, SERVICE_NAME};
use ynab_mcp::YnabMcpServer;

async fn spawn(token: Option<&str>) -> (SocketAddr, CancellationToken) {
    let client = YnabClient::new("upstream", ClientConfig::with_base_url("http://127.0.0.1:9"))
        .unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let shutdown = CancellationToken::new();
    let addr = spawn_with_listener(
        YnabMcpServer::new(client),
        token.map(str::to_string),
        listener,
        shutdown.clone(),
    )
    .unwrap();
    (addr, shutdown)
}

#[tokio::test]
async fn test_health_is_public() {
    let (addr, shutdown) = spawn(Some("secret")).await;

    let resp = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], SERVICE_NAME);

    shutdown.cancel();
}

#[tokio::test]
async fn test_root_page_lists_endpoints() {
    let (addr, shutdown) = spawn(None).await;

    let text = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(text.contains("/mcp"));
    assert!(text.contains("/health"));

    shutdown.cancel();
}

#[tokio::test]
async fn test_mcp_requires_bearer_when_configured() {
    let (addr, shutdown) = spawn(Some("secret")).await;
    let http = reqwest::Client::new();
    let url = format!("http://{}/mcp", addr);

    let missing = http.post(&url).body("{}").send().await.unwrap();
    assert_eq!(missing.status(), 401);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Valid Bearer token required");

    let wrong = http
        .post(&url)
        .bearer_auth("nope")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), 401);

    let right = http
        .post(&url)
        .bearer_auth("secret")
        .header("content-type", "application/json")
        .header("accept", "application/json, text/event-stream")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_ne!(right.status(), 401);

    shutdown.cancel();
}

#[tokio::test]
async fn test_mcp_open_without_token() {
    let (addr, shutdown) = spawn(None).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{}/mcp", addr))
        .header("content-type", "application/json")
        .header("accept", "application/json, text/event-stream")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_ne!(resp.status(), 401);

    shutdown.cancel();
}

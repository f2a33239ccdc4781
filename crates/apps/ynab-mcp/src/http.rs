//! Streamable HTTP transport.
//!
//! Serves the MCP endpoint at `/mcp` plus `/health` and an informational
//! root page. When an auth token is configured, `/mcp` requires
//! `Authorization: Bearer <token>`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::server::YnabMcpServer;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "ynab-mcp-server";

const ROOT_TEXT: &str = "YNAB MCP Server

This is a Model Context Protocol (MCP) server for YNAB (You Need A Budget).

Endpoints:
  POST /mcp    - MCP streamable HTTP endpoint
  GET  /health - Health check
";

#[derive(Clone)]
struct AuthState {
    token: Option<Arc<str>>,
}

async fn require_bearer(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.token.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if provided == Some(expected) {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request");
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Unauthorized",
            "message": "Valid Bearer token required",
        })),
    )
        .into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

async fn root() -> &'static str {
    ROOT_TEXT
}

/// Build the HTTP router for `server`.
pub fn router(server: YnabMcpServer, auth_token: Option<String>) -> Router {
    let auth = AuthState {
        token: auth_token.filter(|t| !t.is_empty()).map(Arc::from),
    };
    if auth.token.is_some() {
        info!("HTTP authentication enabled");
    } else {
        warn!("HTTP authentication disabled - server is open to all requests");
    }

    let mcp = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let protected = Router::new()
        .nest_service("/mcp", mcp)
        .layer(middleware::from_fn_with_state(auth, require_bearer));

    Router::new()
        .route("/health", get(health))
        .route("/", get(root))
        .merge(protected)
}

/// Serve on `listener` until `shutdown` is cancelled.
pub async fn run_with_listener(
    server: YnabMcpServer,
    auth_token: Option<String>,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router(server, auth_token))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Spawn the server on `listener` and return the bound address.
pub fn spawn_with_listener(
    server: YnabMcpServer,
    auth_token: Option<String>,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(server, auth_token, listener, shutdown).await {
            tracing::error!("HTTP server failed: {err}");
        }
    });

    Ok(addr)
}

/// Bind `host:port` and serve until the client's cancellation token fires.
pub async fn run_http(
    server: YnabMcpServer,
    host: &str,
    port: u16,
    auth_token: Option<String>,
) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind((host, port)).await?;
    let shutdown = server.client().cancellation_token().clone();
    run_with_listener(server, auth_token, listener, shutdown).await
}

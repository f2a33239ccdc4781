//! In-process stand-in for the upstream budgeting API.
//!
//! `MockUpstream` is a small axum server bound to `127.0.0.1:0`. Tests script
//! responses per `(method, path)` and inspect the requests it received.
//! Scripted responses are consumed in order; the last one repeats.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// A scripted upstream response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    body: Option<Value>,
}

impl MockResponse {
    /// `200` with `{"data": value}`.
    pub fn data(value: Value) -> Self {
        Self {
            status: 200,
            body: Some(json!({ "data": value })),
        }
    }

    /// `201` with `{"data": value}`.
    pub fn created(value: Value) -> Self {
        Self {
            status: 201,
            body: Some(json!({ "data": value })),
        }
    }

    /// Error status with the upstream error envelope.
    pub fn error(status: u16, detail: &str) -> Self {
        Self {
            status,
            body: Some(json!({
                "error": {
                    "id": status.to_string(),
                    "name": error_name(status),
                    "detail": detail,
                }
            })),
        }
    }

    /// Bare status with an empty body.
    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Arbitrary status and raw JSON body.
    pub fn raw(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }
}

fn error_name(status: u16) -> &'static str {
    match status {
        400 => "bad_request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not_found",
        409 => "conflict",
        429 => "too_many_requests",
        _ => "internal_server_error",
    }
}

/// A request received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

struct Route {
    method: Method,
    path: String,
    responses: VecDeque<MockResponse>,
}

#[derive(Default)]
struct MockUpstreamInner {
    routes: Vec<Route>,
    requests: Vec<RecordedRequest>,
}

/// A scripted HTTP server standing in for the upstream API.
///
/// Cheap to clone; all clones share the same script and request log. The
/// server task is aborted when the last handle that owns it is dropped.
#[derive(Clone)]
pub struct MockUpstream {
    addr: SocketAddr,
    inner: Arc<Mutex<MockUpstreamInner>>,
    _task: Arc<ServerTask>,
}

struct ServerTask(JoinHandle<()>);

impl Drop for ServerTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl MockUpstream {
    /// Bind to an ephemeral local port and start serving.
    pub async fn start() -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let inner = Arc::new(Mutex::new(MockUpstreamInner::default()));

        let app = Router::new().fallback(handle).with_state(Arc::clone(&inner));
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            inner,
            _task: Arc::new(ServerTask(task)),
        })
    }

    /// Base URL to hand to the client, e.g. `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queue a response for `method path`.
    pub fn on(&self, method: &str, path: &str, response: MockResponse) -> &Self {
        let method = Method::from_bytes(method.as_bytes()).unwrap_or(Method::GET);
        let mut inner = self.inner.lock().unwrap();
        match inner
            .routes
            .iter()
            .position(|r| r.method == method && r.path == path)
        {
            Some(index) => inner.routes[index].responses.push_back(response),
            None => inner.routes.push(Route {
                method,
                path: path.to_string(),
                responses: VecDeque::from([response]),
            }),
        }
        self
    }

    /// Shorthand for `on("GET", path, MockResponse::data(value))`.
    pub fn on_get(&self, path: &str, value: Value) -> &Self {
        self.on("GET", path, MockResponse::data(value))
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Number of requests received for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// The most recent request for `path`, if any.
    pub fn last_request(&self, path: &str) -> Option<RecordedRequest> {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }
}

async fn handle(
    State(inner): State<Arc<Mutex<MockUpstreamInner>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).ok(),
    };

    let response = {
        let mut inner = inner.lock().unwrap();
        inner.requests.push(recorded);
        let next = inner
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.path == uri.path())
            .and_then(|route| {
                if route.responses.len() > 1 {
                    route.responses.pop_front()
                } else {
                    route.responses.front().cloned()
                }
            });
        next
    };

    let response =
        response.unwrap_or_else(|| MockResponse::error(404, &format!("no mock for {}", uri.path())));
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match response.body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    }
}

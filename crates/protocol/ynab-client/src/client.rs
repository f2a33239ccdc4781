//! The authenticated HTTP client and its request primitive.

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::envelope::{Envelope, ErrorEnvelope};
use crate::error::{ClientError, ClientResult};
use crate::retry::RetryPolicy;

/// Async client for the upstream budgeting API.
///
/// Holds only immutable settings plus a connection pool, so it is cheap to
/// clone and safe to share behind an `Arc` across concurrent tool calls.
#[derive(Clone)]
pub struct YnabClient {
    http: Client,
    base_url: Url,
    token: String,
    retry: RetryPolicy,
    cancel: CancellationToken,
}

impl std::fmt::Debug for YnabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YnabClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .field("retry", &self.retry)
            .finish()
    }
}

impl YnabClient {
    /// Create a client with the given personal access token.
    pub fn new(token: impl Into<String>, config: ClientConfig) -> ClientResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::validation("access token must not be empty"));
        }
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::transport(format!("failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(config.base_url.trim().trim_end_matches('/'))
            .map_err(|e| ClientError::validation(format!("invalid base_url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::validation("base_url must be a hierarchical http(s) URL"));
        }

        Ok(Self {
            http,
            base_url,
            token,
            retry: RetryPolicy::from_config(&config.retry),
            cancel: CancellationToken::new(),
        })
    }

    /// Use `cancel` to interrupt pending backoffs.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts pending backoffs when cancelled.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Request URL for `segments`, each percent-encoded as a single path
    /// segment so identifiers cannot add segments or start a query.
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| matches!(s.trim(), "" | "." | ".."))
        {
            return Err(ClientError::validation(format!(
                "invalid identifier '{}'",
                bad
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::validation("base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET the path made of `path` segments and decode the `data` envelope.
    pub(crate) async fn get<T>(&self, path: &[&str], query: &[(&str, String)]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let body = self.call(Method::GET, path, query, None).await?;
        decode(&body)
    }

    /// Send a JSON body and decode the `data` envelope.
    pub(crate) async fn send<B, T>(
        &self,
        method: Method,
        path: &[&str],
        body: &B,
    ) -> ClientResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::validation(format!("failed to encode body: {}", e)))?;
        let text = self.call(method, path, &[], Some(&body)).await?;
        decode(&text)
    }

    /// Perform one logical call with retries; returns the raw success body.
    async fn call(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> ClientResult<String> {
        let url = self.url(path)?;
        debug!(method = %method, path = url.path(), "Upstream request");

        self.retry
            .execute(&self.cancel, || self.attempt(method.clone(), &url, query, body))
            .await
    }

    async fn attempt(
        &self,
        method: Method,
        url: &Url,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> ClientResult<String> {
        let mut request = self
            .http
            .request(method, url.clone())
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!(status = status.as_u16(), bytes = text.len(), "Upstream response");

        if status.is_success() {
            return Ok(text);
        }
        Err(ClientError::from_status(
            status.as_u16(),
            ErrorEnvelope::detail_from_body(&text),
        ))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ClientError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        let err = YnabClient::new("  ", ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            YnabClient::new("token", ClientConfig::with_base_url("http://localhost:9/v1/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/v1");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = YnabClient::new("token", ClientConfig::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_url_encodes_each_segment() {
        let client =
            YnabClient::new("token", ClientConfig::with_base_url("http://localhost:9/v1/")).unwrap();
        let url = client.url(&["budgets", "a/b?c#d%e", "payees"]).unwrap();
        assert_eq!(url.path(), "/v1/budgets/a%2Fb%3Fc%23d%25e/payees");
        assert_eq!(url.query(), None);

        for bad in ["", " ", ".", ".."] {
            let err = client.url(&["budgets", bad]).unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_debug_hides_token() {
        let client = YnabClient::new("super-secret", ClientConfig::default()).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn test_decode_envelope_mismatch() {
        let err = decode::<Vec<String>>(r#"{"nope": 1}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}

//! HTTP transport to the studio REST backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use studio_core::config::ApiConfig;
use studio_core::error::{Result, StudioError};
use studio_core::remote::Transport;
use studio_core::state::TokenRepository;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// JSON-over-HTTP client.
///
/// Attaches the stored bearer token to every request. A 401 answer clears
/// the token and surfaces as [`StudioError::SessionExpired`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenRepository>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenRepository>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StudioError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn send_request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let mut request = self
            .client
            .request(method.clone(), self.url(path))
            .header("content-type", "application/json");

        match self.tokens.get_token().await {
            Ok(Some(token)) => request = request.bearer_auth(token),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not read token, sending unauthenticated"),
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| StudioError::transport(format!("{method} {path} failed: {err}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::info!(path, "Session expired, clearing token");
            if let Err(e) = self.tokens.clear_token().await {
                tracing::warn!(error = %e, "Failed to clear expired token");
            }
            return Err(StudioError::SessionExpired);
        }

        let text = response
            .text()
            .await
            .map_err(|err| StudioError::transport(format!("Failed to read response body: {err}")))?;

        if !status.is_success() {
            return Err(map_http_error(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|err| StudioError::decode(path, err.to_string()))
    }
}

fn map_http_error(status: StatusCode, body: &str) -> StudioError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|wrapper| wrapper.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    StudioError::remote(status.as_u16(), message)
}

#[async_trait]
impl Transport for ApiClient {
    async fn get(&self, path: &str) -> Result<Value> {
        self.send_request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.send_request(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.send_request(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.send_request(Method::DELETE, path, None).await
    }
}

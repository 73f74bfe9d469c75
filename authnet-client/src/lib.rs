//! # Authnet Client
//!
//! reqwest transport for the Authorize.Net JSON API.
//!
//! Posts a `createTransactionRequest` envelope to the sandbox or live
//! endpoint and decodes the reply, tolerating the stray byte-order mark the
//! gateway prefixes to its JSON bodies.

mod config;

pub use config::ClientConfig;

use authnet_types::{CreateTransactionRequest, GatewayTransport, TransportError};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Sandbox endpoint, used in test mode.
pub const SANDBOX_ENDPOINT: &str = "https://apitest.authorize.net/xml/v1/request.api";

/// Production endpoint.
pub const LIVE_ENDPOINT: &str = "https://api.authorize.net/xml/v1/request.api";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ClientError> for TransportError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Json(e) => TransportError::Serialization(e.to_string()),
            other => TransportError::Http(other.to_string()),
        }
    }
}

/// Authorize.Net API client.
pub struct AuthnetClient {
    endpoint: Option<String>,
    http: Client,
}

impl Default for AuthnetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthnetClient {
    /// Creates a client that picks the endpoint from each request's test flag.
    pub fn new() -> Self {
        Self {
            endpoint: None,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.endpoint {
            Some(url) => Self::new().with_endpoint(url.clone()),
            None => Self::new(),
        }
    }

    /// Sends every request to `endpoint`, regardless of test mode.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// The URL a request is posted to.
    pub fn endpoint(&self, test_mode: bool) -> &str {
        match (&self.endpoint, test_mode) {
            (Some(url), _) => url,
            (None, true) => SANDBOX_ENDPOINT,
            (None, false) => LIVE_ENDPOINT,
        }
    }

    /// Posts the request and decodes the response body.
    ///
    /// The HTTP status is logged but not interpreted.
    pub async fn post(
        &self,
        request: &CreateTransactionRequest,
        test_mode: bool,
    ) -> Result<Option<Value>, ClientError> {
        let url = self.endpoint(test_mode);
        let body = serde_json::to_vec(request)?;
        debug!(url, bytes = body.len(), "Posting transaction request");

        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Gateway responded");
        } else {
            warn!(status = status.as_u16(), "Gateway responded with non-success status");
        }

        let bytes = resp.bytes().await?;
        Ok(decode_body(&bytes))
    }
}

#[async_trait::async_trait]
impl GatewayTransport for AuthnetClient {
    async fn send(
        &self,
        request: &CreateTransactionRequest,
        test_mode: bool,
    ) -> Result<Option<Value>, TransportError> {
        self.post(request, test_mode).await.map_err(Into::into)
    }
}

/// Drops a leading byte-order mark: up to three bytes that are either
/// control characters or outside ASCII.
pub fn strip_bom(body: &[u8]) -> &[u8] {
    let marker = body
        .iter()
        .take(3)
        .take_while(|&&b| matches!(b, 0x00..=0x1F | 0x80..=0xFF))
        .count();
    &body[marker..]
}

/// Decodes a response body as JSON, or `None` if it is not JSON.
pub fn decode_body(body: &[u8]) -> Option<Value> {
    match serde_json::from_slice(strip_bom(body)) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "Gateway response is not valid JSON");
            None
        }
    }
}

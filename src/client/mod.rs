//! HTTP client for the esa.io v1 API.
//!
//! Every operation sends at most one request and returns an
//! [`ApiResult`](crate::ApiResult). Preconditions are checked before any I/O,
//! and success requires the exact status code the operation expects.

mod posts;
pub mod types;
mod user;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::EsaConfig;
use crate::error::{ApiError, ApiResult, McpError, Result, UNREADABLE_BODY};

/// esa.io API client for one team.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct EsaClient {
    http: reqwest::Client,
    config: EsaConfig,
}

impl EsaClient {
    /// Build a client that authenticates every request with the configured token.
    pub fn new(config: EsaConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.token()))
            .map_err(|_| McpError::Config("token contains invalid header characters".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| McpError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &EsaConfig {
        &self.config
    }
}

/// Reject `post_number <= 0` before touching the network.
fn check_post_number(post_number: i64) -> ApiResult<()> {
    if post_number <= 0 {
        return Err(ApiError::InvalidPostNumber);
    }
    Ok(())
}

/// Pass the response through if it carries `expected`, otherwise turn it into
/// an [`ApiError::Status`] with the body captured best-effort.
async fn expect_status(response: Response, expected: StatusCode) -> ApiResult<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| UNREADABLE_BODY.to_string());
    debug!(status = status.as_u16(), expected = expected.as_u16(), "unexpected esa.io status");

    Err(ApiError::Status {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}

/// Read the whole body, then parse it. A body that does not fit `T` is an
/// [`ApiError::Decode`] carrying the parser's message.
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ApiError::Decode)
}

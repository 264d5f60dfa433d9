//! HTTP transport for lookup requests.
//!
//! The dispatcher only sees the `LexicalTransport` trait, so lookups can run
//! against canned payloads in tests.

use crate::config::LookupConfig;
use crate::error::{LookupError, Result};
use crate::request::LookupRequest;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

#[async_trait]
pub trait LexicalTransport: Send + Sync {
    /// Transport name for logs (e.g. "http").
    fn name(&self) -> &'static str;

    /// Perform one GET and return the decoded JSON body.
    async fn fetch_json(&self, request: &LookupRequest) -> Result<Value>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LookupError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LexicalTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_json(&self, request: &LookupRequest) -> Result<Value> {
        let endpoint = request.endpoint().to_string();
        let response = self
            .client
            .get(request.url().clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LookupError::transport(&endpoint, format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::transport(&endpoint, format!("failed to read body: {}", e)))?;
        debug!("{} {} -> {} ({} bytes)", endpoint, request.url(), status, body.len());

        if !status.is_success() {
            // The dictionary answers unknown words with 404 and a JSON body;
            // hand that body on so the "not found" marker can be recognised.
            if request.is_authoritative() && status == StatusCode::NOT_FOUND {
                if let Ok(value) = serde_json::from_str::<Value>(&body) {
                    return Ok(value);
                }
            }
            return Err(LookupError::transport(&endpoint, format!("HTTP {}", status)));
        }

        serde_json::from_str(&body)
            .map_err(|e| LookupError::transport(&endpoint, format!("malformed JSON: {}", e)))
    }
}

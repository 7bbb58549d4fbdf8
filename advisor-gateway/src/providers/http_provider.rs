//! JSON-over-HTTP data provider.
//!
//! The request URL comes from a template with `{key}` and `{class}`
//! placeholders, e.g. `https://vendor.example/v1/{class}/{key}`. An optional
//! JSON pointer selects the payload inside the response body. One attempt per
//! call; retries belong to the gateway.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use advisor_core::errors::{ProviderError, ProviderResult};
use advisor_core::models::DataClass;
use advisor_core::traits::IDataProvider;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

pub struct HttpJsonProvider {
    name: String,
    url_template: String,
    /// JSON pointer (RFC 6901) to the payload, e.g. `/data`.
    payload_pointer: Option<String>,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout: Duration,
    available: AtomicBool,
}

impl HttpJsonProvider {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let name = name.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::RequestFailed {
                provider: name.clone(),
                reason: format!("client build failed: {e}"),
            })?;
        Ok(Self {
            name,
            url_template: url_template.into(),
            payload_pointer: None,
            api_key: None,
            client,
            timeout,
            available: AtomicBool::new(true),
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_payload_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.payload_pointer = Some(pointer.into());
        self
    }

    /// Take the provider out of (or back into) rotation.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Expand the URL template for one request.
    pub fn url_for(&self, key: &str, class: DataClass) -> String {
        self.url_template
            .replace("{key}", &encode_component(key.trim()))
            .replace("{class}", class.as_str())
    }

    fn extract(&self, body: Value) -> ProviderResult<Value> {
        match &self.payload_pointer {
            None => Ok(body),
            Some(ptr) => body.pointer(ptr).cloned().ok_or_else(|| {
                ProviderError::RequestFailed {
                    provider: self.name.clone(),
                    reason: format!("response has no payload at {ptr}"),
                }
            }),
        }
    }
}

/// Percent-encode everything outside the URL unreserved set.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[async_trait]
impl IDataProvider for HttpJsonProvider {
    async fn fetch(&self, key: &str, class: DataClass) -> ProviderResult<Value> {
        let url = self.url_for(key, class);
        debug!(provider = %self.name, %url, "upstream request");

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: self.name.clone(),
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                ProviderError::RequestFailed {
                    provider: self.name.clone(),
                    reason: format!("HTTP error: {e}"),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::RequestFailed {
                provider: self.name.clone(),
                reason: format!("upstream returned {status}"),
            });
        }

        let body: Value = response.json().await.map_err(|e| ProviderError::RequestFailed {
            provider: self.name.clone(),
            reason: format!("JSON parse error: {e}"),
        })?;
        self.extract(body)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

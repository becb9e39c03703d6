//! HTTP client for the Datto API
//!
//! Builds the outbound request from a `RequestSpec`, applies Basic auth and
//! turns every failure into `Error::ApiRequest`. There is no retry or
//! backoff: a failed request is final.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::request::{ApiPath, RequestSpec};
use crate::auth::{Authenticator, Credential};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Fixed origin of the Datto REST API
pub const DEFAULT_BASE_URL: &str = "https://api.datto.com/v1";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    /// Optional client-side rate limit
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("datto-backup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Authenticated HTTP client for the Datto API
pub struct HttpClient {
    client: Client,
    base_url: Url,
    config: HttpClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client with the given configuration and authenticator
    pub fn new(config: HttpClientConfig, authenticator: Authenticator) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            base_url,
            config,
            authenticator,
            rate_limiter,
        })
    }

    /// Create a client from a stored credential
    pub fn from_credential(config: HttpClientConfig, credential: &Credential) -> Result<Self> {
        let authenticator = Authenticator::from_credential(credential)?;
        Self::new(config, authenticator)
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Make a GET request without query or body
    pub async fn get(&self, path: ApiPath) -> Result<JsonValue> {
        self.request(&RequestSpec::get(path)).await
    }

    /// Execute one request and parse the JSON response
    ///
    /// A 2xx response with an empty body yields `null`.
    pub async fn request(&self, spec: &RequestSpec) -> Result<JsonValue> {
        let url = self.build_url(&spec.path)?;

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(spec.method.into(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !spec.query.is_empty() {
            req = req.query(&spec.query);
        }

        // Some endpoints reject `{}` on GET, so an empty body is never sent.
        if !spec.body.is_empty() {
            req = req.json(&spec.body);
        }

        req = self.authenticator.apply(req);

        debug!(method = %spec.method, url = %url, "Sending request");

        let response = req.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            debug!(method = %spec.method, url = %url, status = status.as_u16(), "Request failed");
            return Err(status_error(status, &text));
        }

        parse_body(&text)
    }

    /// Build full URL from an API path
    pub fn build_url(&self, path: &ApiPath) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::config("Base URL cannot carry a path"))?;
            segments.pop_if_empty();
            segments.extend(path.segments());
        }
        Ok(url)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    Error::ApiRequest {
        message: err.to_string(),
        status: err.status().map(|s| s.as_u16()),
        messages: Vec::new(),
    }
}

const MAX_TEXT_MESSAGE_CHARS: usize = 200;

fn status_error(status: StatusCode, body: &str) -> Error {
    let message = status
        .canonical_reason()
        .unwrap_or("Unexpected response status")
        .to_string();
    let messages = match serde_json::from_str::<JsonValue>(body) {
        Ok(value) => extract_error_messages(&value),
        Err(_) => text_message(body, &message).into_iter().collect(),
    };

    Error::api_status(status.as_u16(), message, messages)
}

/// A plain-text error body, unless it only repeats the status reason
fn text_message(body: &str, reason: &str) -> Option<String> {
    let text = body.trim();
    if text.is_empty() || text.eq_ignore_ascii_case(reason) {
        return None;
    }
    Some(text.chars().take(MAX_TEXT_MESSAGE_CHARS).collect())
}

fn parse_body(text: &str) -> Result<JsonValue> {
    if text.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    serde_json::from_str(text)
        .map_err(|e| Error::api(format!("Response body is not valid JSON: {e}")))
}

/// Collect the human-readable messages an error body carries
///
/// Understands `message`, `error` (string or `{message}`), and `errors`
/// as an array of strings/`{message}` objects or a map of field to
/// message(s).
pub fn extract_error_messages(body: &JsonValue) -> Vec<String> {
    let mut messages = Vec::new();

    let Some(obj) = body.as_object() else {
        return messages;
    };

    if let Some(msg) = obj.get("message").and_then(JsonValue::as_str) {
        messages.push(msg.to_string());
    }

    match obj.get("error") {
        Some(JsonValue::String(msg)) => messages.push(msg.clone()),
        Some(JsonValue::Object(inner)) => {
            if let Some(msg) = inner.get("message").and_then(JsonValue::as_str) {
                messages.push(msg.to_string());
            }
        }
        _ => {}
    }

    match obj.get("errors") {
        Some(JsonValue::Array(items)) => {
            for item in items {
                push_message(&mut messages, item);
            }
        }
        Some(JsonValue::Object(fields)) => {
            for (field, value) in fields {
                match value {
                    JsonValue::Array(items) => {
                        for item in items.iter().filter_map(JsonValue::as_str) {
                            messages.push(format!("{field}: {item}"));
                        }
                    }
                    JsonValue::String(msg) => messages.push(format!("{field}: {msg}")),
                    _ => {}
                }
            }
        }
        _ => {}
    }

    let mut seen = std::collections::HashSet::new();
    messages.retain(|m| seen.insert(m.clone()));
    messages
}

fn push_message(messages: &mut Vec<String>, item: &JsonValue) {
    match item {
        JsonValue::String(msg) => messages.push(msg.clone()),
        JsonValue::Object(obj) => {
            if let Some(msg) = obj.get("message").and_then(JsonValue::as_str) {
                messages.push(msg.to_string());
            }
        }
        _ => {}
    }
}

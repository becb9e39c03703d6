//! Client configuration
//!
//! Settings files are YAML or JSON, chosen by extension (`.json` is JSON,
//! anything else YAML). Keys are camelCase; snake_case spellings are
//! accepted as aliases.

use crate::auth::Credential;
use crate::error::{Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Client settings loaded from a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// API origin
    #[serde(default, alias = "base_url")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default, alias = "timeout_secs")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header
    #[serde(default, alias = "user_agent")]
    pub user_agent: Option<String>,

    /// Client-side rate limit; off when absent
    #[serde(default, alias = "rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ClientSettings {
    /// Convert into an HTTP client configuration
    pub fn into_http_config(self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()));

        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(rate_limit) = self.rate_limit {
            builder = builder.rate_limit(rate_limit);
        }
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

/// Load client settings from a YAML or JSON file
pub fn load_settings(path: impl AsRef<Path>) -> Result<ClientSettings> {
    load_document(path.as_ref())
}

/// Load a stored credential from a YAML or JSON file
pub fn load_credential(path: impl AsRef<Path>) -> Result<Credential> {
    load_document(path.as_ref())
}

/// Parse a credential from a JSON string
pub fn parse_credential(json: &str) -> Result<Credential> {
    Ok(serde_json::from_str(json)?)
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

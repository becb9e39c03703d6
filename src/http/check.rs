//! Connection check
//!
//! Requests a single device to confirm that the credentials are accepted.

use super::client::HttpClient;
use super::request::{ApiPath, RequestSpec};
use crate::pagination::{PAGE_PARAM, PER_PAGE_PARAM};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outcome of a connection check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Credentials accepted
    #[serde(rename = "OK")]
    Ok,
    /// Request failed
    Error,
}

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Check outcome
    pub status: CheckStatus,
    /// Human-readable message
    pub message: String,
}

impl ConnectionStatus {
    /// Whether the check succeeded
    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

/// Test the client's credentials against the device list endpoint
///
/// API failures are reported in the returned status, never as `Err`.
pub async fn check_connection(client: &HttpClient) -> ConnectionStatus {
    let spec = RequestSpec::get(ApiPath::new("/bcdr/device"))
        .query(PAGE_PARAM, 1u32)
        .query(PER_PAGE_PARAM, 1u32);

    match client.request(&spec).await {
        Ok(_) => {
            info!("Connection check succeeded");
            ConnectionStatus {
                status: CheckStatus::Ok,
                message: "Connection successful!".to_string(),
            }
        }
        Err(e) => {
            warn!(error = %e, "Connection check failed");
            ConnectionStatus {
                status: CheckStatus::Error,
                message: format!("Connection failed: {e}"),
            }
        }
    }
}

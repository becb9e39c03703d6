//! Option loaders
//!
//! Name/value lists used by hosts to populate selection dropdowns. Loaders
//! never fail: an API error is logged and yields an empty list.

use crate::decode::ResponseNormalizer;
use crate::http::{ApiPath, HttpClient, RequestSpec};
use crate::pagination::Paginator;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fields tried, in order, for a SaaS customer's id
const CUSTOMER_ID_FIELDS: [&str; 4] = [
    "saasCustomerId",
    "customerId",
    "id",
    "externalSubscriptionId",
];

/// Fields tried, in order, for a SaaS customer's display name
const CUSTOMER_NAME_FIELDS: [&str; 5] = [
    "saasCustomerName",
    "organizationName",
    "domain",
    "name",
    "customerName",
];

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Display name
    pub name: String,
    /// Value passed back as a parameter
    pub value: String,
}

impl OptionEntry {
    /// Create an option entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// All devices, valued by serial number
pub async fn load_devices(client: &HttpClient) -> Vec<OptionEntry> {
    let spec = RequestSpec::get(ApiPath::new("/bcdr/device"));
    match Paginator::new(client).fetch_all(&spec).await {
        Ok(paged) => {
            let entries: Vec<_> = paged.items.iter().filter_map(device_entry).collect();
            debug!(count = entries.len(), "Loaded device options");
            entries
        }
        Err(e) => {
            warn!(error = %e, "Failed to load devices");
            Vec::new()
        }
    }
}

/// All SaaS customers, valued by customer id
pub async fn load_saas_customers(client: &HttpClient) -> Vec<OptionEntry> {
    let spec = RequestSpec::get(ApiPath::new("/saas/domains"));
    match client.request(&spec).await {
        Ok(body) => {
            let entries: Vec<_> = ResponseNormalizer::SAAS_DOMAINS
                .normalize(body)
                .iter()
                .filter_map(customer_entry)
                .collect();
            debug!(count = entries.len(), "Loaded SaaS customer options");
            entries
        }
        Err(e) => {
            warn!(error = %e, "Failed to load SaaS customers");
            Vec::new()
        }
    }
}

fn device_entry(device: &JsonValue) -> Option<OptionEntry> {
    let serial = text(device.get("serialNumber"))?;
    let name = text(device.get("name")).unwrap_or_else(|| serial.clone());
    Some(OptionEntry::new(name, serial))
}

fn customer_entry(domain: &JsonValue) -> Option<OptionEntry> {
    let id = first_text(domain, &CUSTOMER_ID_FIELDS)?;
    let name = first_text(domain, &CUSTOMER_NAME_FIELDS).unwrap_or_else(|| id.clone());
    Some(OptionEntry::new(name, id))
}

fn first_text(value: &JsonValue, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| text(value.get(*field)))
}

/// Non-empty string, or a number rendered as text
fn text(value: Option<&JsonValue>) -> Option<String> {
    match value? {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

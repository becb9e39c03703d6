//! Record extraction from heterogeneous list responses

use crate::types::JsonValue;

/// Extracts the record list from a response body
///
/// Each endpoint family has its own ordered list of wrapper keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseNormalizer {
    keys: &'static [&'static str],
}

impl ResponseNormalizer {
    /// Responses wrapped under `items`
    pub const ITEMS: Self = Self::new(&["items"]);

    /// SaaS domain listings
    pub const SAAS_DOMAINS: Self = Self::new(&["items", "data"]);

    /// SaaS seat listings
    pub const SAAS_SEATS: Self = Self::new(&["items", "seats", "data"]);

    /// SaaS application listings
    pub const SAAS_APPLICATIONS: Self = Self::new(&["items", "applications", "data"]);

    /// Create a normalizer with the given candidate keys, tried in order
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    /// Candidate wrapper keys
    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    /// Flatten a response body into a list of records
    pub fn normalize(&self, body: JsonValue) -> Vec<JsonValue> {
        match body {
            JsonValue::Array(items) => items,
            JsonValue::Object(mut map) => {
                let key = self
                    .keys
                    .iter()
                    .find(|key| matches!(map.get(**key), Some(JsonValue::Array(_))));
                match key.and_then(|key| map.remove(*key)) {
                    Some(JsonValue::Array(items)) => items,
                    _ => vec![JsonValue::Object(map)],
                }
            }
            _ => Vec::new(),
        }
    }
}

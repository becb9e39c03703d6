//! Common types used throughout the Datto Backup client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters for a single request, ordered by key
pub type QueryMap = BTreeMap<String, QueryValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Query Values
// ============================================================================

/// A scalar query parameter value, serialized as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Text value
    String(String),
    /// Integer value
    Integer(i64),
    /// Boolean value (serialized as `true`/`false`)
    Bool(bool),
}

impl QueryValue {
    /// Convert a JSON scalar into a query value
    ///
    /// Returns `None` for null, arrays, objects and non-integral numbers
    /// that cannot be represented without loss.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(s) => Some(Self::String(s.clone())),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| Some(Self::String(n.to_string()))),
            _ => None,
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::String(s) => f.write_str(s),
            QueryValue::Integer(n) => write!(f, "{n}"),
            QueryValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::GET), reqwest::Method::GET);
        assert_eq!(Method::default(), Method::GET);
        assert_eq!(Method::DELETE.to_string(), "DELETE");
    }

    #[test]
    fn test_query_value_from_json() {
        assert_eq!(
            QueryValue::from_json(&json!("acme")),
            Some(QueryValue::String("acme".to_string()))
        );
        assert_eq!(
            QueryValue::from_json(&json!(7)),
            Some(QueryValue::Integer(7))
        );
        assert_eq!(
            QueryValue::from_json(&json!(true)),
            Some(QueryValue::Bool(true))
        );
        assert_eq!(
            QueryValue::from_json(&json!(1.5)),
            Some(QueryValue::String("1.5".to_string()))
        );
        assert_eq!(QueryValue::from_json(&json!(null)), None);
        assert_eq!(QueryValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_query_value_display() {
        assert_eq!(QueryValue::from("x").to_string(), "x");
        assert_eq!(QueryValue::from(100u32).to_string(), "100");
        assert_eq!(QueryValue::from(false).to_string(), "false");
    }
}

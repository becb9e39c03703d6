//! Host parameter access
//!
//! Hosts hand over per-item parameters keyed by name. Handlers read them
//! through `ItemParams`, which turns absent or mistyped values into
//! `MissingParameter` / `InvalidParameter` errors carrying the item index.

use crate::error::{Error, Result};
use crate::pagination::{whole_number, FetchMode, DEFAULT_LIMIT};
use crate::types::{JsonObject, JsonValue};

/// Source of per-item parameter values
pub trait ParameterSource {
    /// Value of parameter `name` for item `index`, if set
    fn get(&self, name: &str, index: usize) -> Option<JsonValue>;
}

/// Items supplied as a list of JSON objects, one object per item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonItems {
    items: Vec<JsonObject>,
}

impl JsonItems {
    /// Create from parameter objects
    pub fn new(items: Vec<JsonObject>) -> Self {
        Self { items }
    }

    /// Parse a JSON value: an array of objects, or a single object
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(index, value)| match value {
                    JsonValue::Object(map) => Ok(map),
                    _ => Err(Error::config(format!("Item {index} is not a JSON object"))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::new),
            JsonValue::Object(map) => Ok(Self::new(vec![map])),
            _ => Err(Error::config("Items must be a JSON object or an array of objects")),
        }
    }

    /// Parse a JSON string
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(s)?)
    }

    /// Set a parameter on every item
    pub fn set_all(&mut self, name: &str, value: &JsonValue) {
        for item in &mut self.items {
            item.insert(name.to_string(), value.clone());
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ParameterSource for JsonItems {
    fn get(&self, name: &str, index: usize) -> Option<JsonValue> {
        self.items.get(index)?.get(name).cloned()
    }
}

/// Typed view over the parameters of one item
#[derive(Clone, Copy)]
pub struct ItemParams<'a> {
    source: &'a dyn ParameterSource,
    index: usize,
}

impl<'a> ItemParams<'a> {
    /// Parameters of item `index`
    pub fn new(source: &'a dyn ParameterSource, index: usize) -> Self {
        Self { source, index }
    }

    /// Item index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw value; `null` counts as absent
    pub fn raw(&self, name: &str) -> Option<JsonValue> {
        self.source.get(name, self.index).filter(|v| !v.is_null())
    }

    /// A required non-empty string; numbers are accepted and stringified
    pub fn required_string(&self, name: &str) -> Result<String> {
        match self.raw(name) {
            None => Err(Error::missing_param(name, self.index)),
            Some(JsonValue::String(s)) if s.is_empty() => {
                Err(Error::missing_param(name, self.index))
            }
            Some(JsonValue::String(s)) => Ok(s),
            Some(JsonValue::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(self.invalid(name, "expected a string", &other)),
        }
    }

    /// A boolean, `default` when absent
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.raw(name) {
            None => Ok(default),
            Some(JsonValue::Bool(b)) => Ok(b),
            Some(JsonValue::String(s)) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(self.invalid(name, "expected a boolean", &JsonValue::String(s.clone()))),
            },
            Some(other) => Err(self.invalid(name, "expected a boolean", &other)),
        }
    }

    /// The `returnAll` flag, false when absent
    pub fn return_all(&self) -> Result<bool> {
        self.bool_or("returnAll", false)
    }

    /// The `limit` parameter, 50 when absent
    pub fn limit(&self) -> Result<u32> {
        let Some(value) = self.raw("limit") else {
            return Ok(DEFAULT_LIMIT);
        };
        let parsed = match &value {
            JsonValue::Number(n) => whole_number(n),
            JsonValue::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match parsed.and_then(|n| u32::try_from(n).ok()) {
            Some(limit) if limit > 0 => Ok(limit),
            _ => Err(self.invalid("limit", "expected a positive integer", &value)),
        }
    }

    /// Fetch mode from `returnAll` and `limit`
    ///
    /// `limit` is only read when `returnAll` is false.
    pub fn fetch_mode(&self) -> Result<FetchMode> {
        if self.return_all()? {
            Ok(FetchMode::All)
        } else {
            Ok(FetchMode::Limit(self.limit()?))
        }
    }

    /// An optional object such as `options` or `filters`; empty when absent
    pub fn object(&self, name: &str) -> Result<JsonObject> {
        match self.raw(name) {
            None => Ok(JsonObject::new()),
            Some(JsonValue::Object(map)) => Ok(map),
            Some(other) => Err(self.invalid(name, "expected an object", &other)),
        }
    }

    fn invalid(&self, name: &str, expected: &str, got: &JsonValue) -> Error {
        Error::invalid_param(name, self.index, format!("{expected}, got {}", type_name(got)))
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

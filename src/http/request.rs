//! Request description
//!
//! A `RequestSpec` is a value object describing one API call. It is built
//! fresh for every call and never shared.

use crate::types::{JsonObject, Method, QueryMap, QueryValue};
use std::fmt;

/// Path below the API origin, kept as individual segments
///
/// Dynamic segments (serial numbers, client IDs, asset UUIDs, customer IDs)
/// are opaque: they are percent-encoded when the URL is built and never
/// split on `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    /// Create a path from a static template such as `/bcdr/device`
    pub fn new(template: &str) -> Self {
        Self::default().literal(template)
    }

    /// Append static segments (split on `/`)
    #[must_use]
    pub fn literal(mut self, template: &str) -> Self {
        self.segments.extend(
            template
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Append one opaque segment
    #[must_use]
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    /// The path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Description of a single API request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Path below the API origin
    pub path: ApiPath,
    /// Query parameters
    pub query: QueryMap,
    /// JSON body; omitted from the request when empty
    pub body: JsonObject,
}

impl RequestSpec {
    /// Create a request spec
    pub fn new(method: Method, path: ApiPath) -> Self {
        Self {
            method,
            path,
            ..Default::default()
        }
    }

    /// Create a GET request spec
    pub fn get(path: ApiPath) -> Self {
        Self::new(Method::GET, path)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge a set of query parameters, replacing existing keys
    #[must_use]
    pub fn with_query(mut self, query: &QueryMap) -> Self {
        self.query
            .extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn body(mut self, body: JsonObject) -> Self {
        self.body = body;
        self
    }
}

//! Error types for the Datto Backup client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Datto Backup client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Could not resolve credentials: {message}")]
    AuthResolution { message: String },

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("{}", format_api_error(.message, .status, .messages))]
    ApiRequest {
        /// Message of the underlying transport or HTTP failure
        message: String,
        /// Upstream HTTP status, when a response was received
        status: Option<u16>,
        /// Structured error messages reported by the API body
        messages: Vec<String>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Dispatch Errors
    // ============================================================================
    #[error("Unknown operation '{operation}' for resource '{resource}'")]
    UnknownOperation { resource: String, operation: String },

    #[error("Missing required parameter '{name}' for item {index}")]
    MissingParameter { name: String, index: usize },

    #[error("Invalid value for parameter '{name}' on item {index}: {message}")]
    InvalidParameter {
        name: String,
        index: usize,
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth resolution error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthResolution {
            message: message.into(),
        }
    }

    /// Create an API error without an upstream status
    pub fn api(message: impl Into<String>) -> Self {
        Self::ApiRequest {
            message: message.into(),
            status: None,
            messages: Vec::new(),
        }
    }

    /// Create an API error for a non-2xx response
    pub fn api_status(status: u16, message: impl Into<String>, messages: Vec<String>) -> Self {
        Self::ApiRequest {
            message: message.into(),
            status: Some(status),
            messages,
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            resource: resource.into(),
            operation: operation.into(),
        }
    }

    /// Create a missing parameter error
    pub fn missing_param(name: impl Into<String>, index: usize) -> Self {
        Self::MissingParameter {
            name: name.into(),
            index,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_param(name: impl Into<String>, index: usize, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            index,
            message: message.into(),
        }
    }

    /// Upstream HTTP status, if this error came from an API response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiRequest { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error came from the upstream API or the transport
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::ApiRequest { .. })
    }
}

fn format_api_error(message: &str, status: &Option<u16>, messages: &[String]) -> String {
    let mut out = match status {
        Some(code) => format!("API request failed (HTTP {code}): {message}"),
        None => format!("API request failed: {message}"),
    };
    if !messages.is_empty() {
        out.push_str(" [");
        out.push_str(&messages.join("; "));
        out.push(']');
    }
    out
}

/// Result type alias for the Datto Backup client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

//! Credential types
//!
//! `Credential` is the stored credential as handed over by the host's
//! credential store. `BasicAuth` is what the authenticator resolves it into.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored API credential
///
/// Two naming schemes exist: `publicKey`/`secretKey` (current) and
/// `user`/`password` (configurations saved before the rename). Both are kept.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Public API key (current field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Secret API key (current field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Public API key (legacy field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Secret API key (legacy field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credential {
    /// Create a credential using the current field names
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            secret_key: Some(secret_key.into()),
            ..Default::default()
        }
    }

    /// Create a credential using the legacy field names
    pub fn legacy(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only report which fields are populated.
        f.debug_struct("Credential")
            .field("public_key", &self.public_key.is_some())
            .field("secret_key", &self.secret_key.is_some())
            .field("user", &self.user.is_some())
            .field("password", &self.password.is_some())
            .finish()
    }
}

/// HTTP Basic authentication parameters
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// Username (the public API key)
    pub username: String,
    /// Password (the secret API key)
    pub password: String,
}

impl BasicAuth {
    /// Create basic auth parameters
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

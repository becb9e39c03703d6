//! Authenticator implementation
//!
//! Resolves stored credentials into Basic auth and applies it to requests.

use super::types::{BasicAuth, Credential};
use crate::error::{Error, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    auth: BasicAuth,
}

impl Authenticator {
    /// Create an authenticator from already-resolved parameters
    pub fn new(auth: BasicAuth) -> Self {
        Self { auth }
    }

    /// Resolve a stored credential and create an authenticator for it
    pub fn from_credential(credential: &Credential) -> Result<Self> {
        resolve_credential(credential).map(Self::new)
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(AUTHORIZATION, self.auth.header_value())
    }

    /// The resolved auth parameters
    pub fn basic_auth(&self) -> &BasicAuth {
        &self.auth
    }
}

/// Resolve a credential into Basic auth parameters
///
/// Current field names win over the legacy ones. Username and password are
/// resolved independently, so a half-migrated credential still works.
pub fn resolve_credential(credential: &Credential) -> Result<BasicAuth> {
    let username = first_populated(&credential.public_key, &credential.user)
        .ok_or_else(|| Error::auth("neither 'publicKey' nor 'user' is set"))?;
    let password = first_populated(&credential.secret_key, &credential.password)
        .ok_or_else(|| Error::auth("neither 'secretKey' nor 'password' is set"))?;

    Ok(BasicAuth::new(username, password))
}

fn first_populated<'a>(current: &'a Option<String>, legacy: &'a Option<String>) -> Option<&'a str> {
    [current, legacy]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
}

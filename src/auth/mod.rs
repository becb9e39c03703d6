//! Authentication module
//!
//! The API uses HTTP Basic auth with the public key as username and the
//! secret key as password. Credentials saved under the legacy field names
//! (`user`/`password`) resolve exactly like the current ones.

mod authenticator;
mod types;

pub use authenticator::{resolve_credential, Authenticator};
pub use types::{BasicAuth, Credential};

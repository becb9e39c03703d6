// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Datto Backup
//!
//! Client core for the Datto BCDR and SaaS Protection REST API.
//!
//! ## Features
//!
//! - **Basic Auth**: current `publicKey`/`secretKey` and legacy `user`/`password` credentials
//! - **Pagination**: `_page`/`_perPage` page following with a 500-request cap
//! - **Response Normalization**: bare arrays, wrapped lists and single objects
//! - **Operation Dispatch**: 17 `resource:operation` handlers over BCDR, SaaS and DTC endpoints
//! - **Batch Execution**: sequential items with optional continue-on-failure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use datto_backup::{run_batch, Credential, HttpClient, HttpClientConfig, JsonItems, Result};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credential = Credential::new("public-key", "secret-key");
//!     let client = HttpClient::from_credential(HttpClientConfig::default(), &credential)?;
//!
//!     let items = JsonItems::from_value(json!([
//!         { "resource": "device", "operation": "getMany", "returnAll": true }
//!     ]))?;
//!
//!     for record in run_batch(client, &items, items.len(), false).await? {
//!         println!("{}", record.json);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Batch Engine                             │
//! │  items[0].resource:operation → Operation → execute(item i)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬─────────────┬───────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Normalize  │  Lookup   │
//! ├──────────┼───────────┼───────────────┼─────────────┼───────────┤
//! │ Basic    │ GET       │ _page         │ bare array  │ devices   │
//! │ legacy   │ path enc. │ _perPage      │ items/data  │ customers │
//! │ aliases  │ Rate Limit│ 500-page cap  │ single obj  │           │
//! └──────────┴───────────┴───────────────┴─────────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credential resolution and Basic auth
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Page-following fetches
pub mod pagination;

/// Response normalization
pub mod decode;

/// Operation keys and handlers
pub mod operation;

/// Batch execution engine
pub mod engine;

/// Dropdown option loaders
pub mod lookup;

/// Client settings and credential files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{Authenticator, BasicAuth, Credential};
pub use engine::{run_batch, BatchConfig, BatchEngine, OutputRecord};
pub use http::{check_connection, ConnectionStatus, HttpClient, HttpClientConfig};
pub use operation::{HandlerOutput, JsonItems, Operation, ParameterSource};
pub use pagination::{FetchMode, PagedItems, Paginator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

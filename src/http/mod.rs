//! HTTP client module
//!
//! Turns a `RequestSpec` into one authenticated request against the Datto
//! API origin and returns the parsed JSON body.
//!
//! # Features
//!
//! - **Request Building**: path segments are URL-encoded, empty bodies omitted
//! - **Authentication**: Basic auth from the resolved credential
//! - **Uniform Errors**: transport and non-2xx failures become `ApiRequest`
//! - **Rate Limiting**: optional token bucket using governor

mod check;
mod client;
mod rate_limit;
mod request;

pub use check::{check_connection, CheckStatus, ConnectionStatus};
pub use client::{
    extract_error_messages, HttpClient, HttpClientConfig, HttpClientConfigBuilder,
    DEFAULT_BASE_URL,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::{ApiPath, RequestSpec};

//! Operation dispatch module
//!
//! Maps a `resource:operation` key to the handler that performs it.
//!
//! # Overview
//!
//! - `Operation` - one variant per supported pair, parsed from the host's
//!   `resource` and `operation` parameters
//! - `ParameterSource` / `ItemParams` - per-item parameter access
//! - `execute` - runs one operation for one item

mod handlers;
mod params;
mod types;

pub use handlers::{execute, HandlerOutput};
pub use params::{ItemParams, JsonItems, ParameterSource};
pub use types::{Operation, Resource};

#[cfg(test)]
mod tests;

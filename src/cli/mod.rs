//! CLI module
//!
//! Command-line interface for the Datto API client.
//!
//! # Commands
//!
//! - `check` - Test connection to the API
//! - `run` - Execute an operation over a batch of items
//! - `operations` - List supported `resource:operation` keys
//! - `devices` - List device options
//! - `customers` - List SaaS customer options

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

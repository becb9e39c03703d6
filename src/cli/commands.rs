//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Datto BCDR and SaaS Protection API client
#[derive(Parser, Debug)]
#[command(name = "datto-backup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Credential file (JSON or YAML) with publicKey/secretKey or user/password
    #[arg(short, long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Inline credential JSON
    #[arg(long, global = true)]
    pub credentials_json: Option<String>,

    /// Client settings file (JSON or YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test connection to the API
    Check,

    /// Run an operation for each input item
    Run {
        /// Resource name (e.g. device, saasSeat)
        #[arg(short, long)]
        resource: String,

        /// Operation name (e.g. get, getMany)
        #[arg(short, long)]
        operation: String,

        /// Items file: a JSON array of parameter objects
        #[arg(short, long, conflicts_with = "items_json")]
        items: Option<PathBuf>,

        /// Inline items JSON (an array of objects, or one object)
        #[arg(long)]
        items_json: Option<String>,

        /// Emit an error record for failed items instead of stopping
        #[arg(long)]
        continue_on_fail: bool,
    },

    /// List supported operations
    Operations,

    /// List devices as name/value options
    Devices,

    /// List SaaS customers as name/value options
    Customers,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

//! CLI runner - executes commands

use crate::auth::Credential;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_credential, load_settings, parse_credential, ClientSettings};
use crate::engine::{BatchConfig, BatchEngine};
use crate::error::{Error, Result, ResultExt};
use crate::http::{check_connection, HttpClient};
use crate::lookup::{load_devices, load_saas_customers, OptionEntry};
use crate::operation::{JsonItems, Operation};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Run {
                resource,
                operation,
                items,
                items_json,
                continue_on_fail,
            } => {
                let items = Self::load_items(items.as_deref(), items_json.as_deref())?;
                self.run_batch(resource, operation, items, *continue_on_fail)
                    .await
            }
            Commands::Operations => self.list_operations(),
            Commands::Devices => {
                let client = self.build_client()?;
                self.output_options(&load_devices(&client).await);
                Ok(())
            }
            Commands::Customers => {
                let client = self.build_client()?;
                self.output_options(&load_saas_customers(&client).await);
                Ok(())
            }
        }
    }

    /// Load client settings, defaults when no file is given
    fn load_settings(&self) -> Result<ClientSettings> {
        match &self.cli.config {
            Some(path) => load_settings(path),
            None => Ok(ClientSettings::default()),
        }
    }

    /// Load the stored credential; inline JSON takes precedence
    fn load_credential(&self) -> Result<Credential> {
        if let Some(json_str) = &self.cli.credentials_json {
            return parse_credential(json_str);
        }

        if let Some(path) = &self.cli.credentials {
            return load_credential(path);
        }

        Err(Error::auth(
            "no credentials provided (use --credentials or --credentials-json)",
        ))
    }

    fn build_client(&self) -> Result<HttpClient> {
        let config = self.load_settings()?.into_http_config();
        HttpClient::from_credential(config, &self.load_credential()?)
    }

    /// Load batch items; a single empty item when none are given
    fn load_items(path: Option<&Path>, inline: Option<&str>) -> Result<JsonItems> {
        if let Some(json_str) = inline {
            return JsonItems::from_json_str(json_str);
        }

        if let Some(path) = path {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read items file '{}'", path.display()))?;
            return JsonItems::from_json_str(&content);
        }

        JsonItems::from_value(json!([{}]))
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let client = self.build_client()?;
        let status = check_connection(&client).await;

        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": status
        }));

        Ok(())
    }

    /// Execute an operation over a batch of items
    async fn run_batch(
        &self,
        resource: &str,
        operation: &str,
        mut items: JsonItems,
        continue_on_fail: bool,
    ) -> Result<()> {
        // Fail before any credential or network work
        Operation::parse(resource, operation)?;

        items.set_all("resource", &json!(resource));
        items.set_all("operation", &json!(operation));

        let client = self.build_client()?;
        let mut engine = BatchEngine::new(client)
            .with_config(BatchConfig::new().with_continue_on_fail(continue_on_fail));

        let records = engine.run(&items, items.len()).await?;
        for record in &records {
            self.output_message(&json!({
                "type": "RECORD",
                "record": record
            }));
        }

        let stats = engine.stats();
        self.output_message(&json!({
            "type": "BATCH_SUMMARY",
            "summary": {
                "operation": format!("{resource}:{operation}"),
                "items": stats.items_processed,
                "records": stats.records_emitted,
                "failures": stats.failures,
                "durationMs": stats.duration_ms
            }
        }));

        Ok(())
    }

    /// List supported operations
    fn list_operations(&self) -> Result<()> {
        let operations: Vec<Value> = Operation::ALL
            .iter()
            .map(|op| {
                json!({
                    "key": op.to_string(),
                    "resource": op.resource(),
                    "operation": op.name(),
                    "endpoint": op.endpoint(),
                    "single": op.is_single()
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "OPERATIONS",
            "operations": operations
        }));

        Ok(())
    }

    fn output_options(&self, options: &[OptionEntry]) {
        self.output_message(&json!({
            "type": "OPTIONS",
            "options": options
        }));
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

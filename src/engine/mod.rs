//! Batch execution module
//!
//! Runs one operation across a list of host items.
//!
//! # Overview
//!
//! The engine module provides:
//! - `BatchEngine` - Processes items strictly in order
//! - `BatchConfig` - Continue-on-failure switch
//! - `OutputRecord` - Result records paired to their input item

mod types;

pub use types::{BatchConfig, BatchStats, OutputRecord};

use crate::error::Result;
use crate::http::HttpClient;
use crate::operation::{execute, ItemParams, Operation, ParameterSource};
use crate::types::JsonValue;
use std::time::Instant;
use tracing::{info, warn};

/// Executes a batch of items against the API
pub struct BatchEngine {
    /// HTTP client
    client: HttpClient,
    /// Batch configuration
    config: BatchConfig,
    /// Statistics from the last run
    stats: BatchStats,
}

impl BatchEngine {
    /// Create a new batch engine
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            config: BatchConfig::default(),
            stats: BatchStats::default(),
        }
    }

    /// Set batch configuration
    #[must_use]
    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Get statistics of the last run
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    /// Run the operation named by item 0 for every item
    ///
    /// The `resource` and `operation` parameters are read from item 0 only.
    /// A failing item either aborts the run or, with continue-on-failure,
    /// becomes one error record paired to its index.
    pub async fn run(
        &mut self,
        source: &dyn ParameterSource,
        item_count: usize,
    ) -> Result<Vec<OutputRecord>> {
        let start = Instant::now();
        self.stats = BatchStats::new();

        let resource = source.get("resource", 0);
        let operation = source.get("operation", 0);
        let mut records = Vec::new();

        for index in 0..item_count {
            let result = match Operation::from_params(resource.as_ref(), operation.as_ref()) {
                Ok(op) => execute(&self.client, op, &ItemParams::new(source, index)).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(output) => {
                    let items = output.into_items();
                    self.stats.add_success(items.len());
                    records.extend(items.into_iter().map(|json| OutputRecord::new(json, index)));
                }
                Err(e) if self.config.continue_on_fail => {
                    warn!(item = index, error = %e, "Item failed, continuing");
                    self.stats.add_failure(true);
                    records.push(OutputRecord::error(e.to_string(), index));
                }
                Err(e) => {
                    self.stats.add_failure(false);
                    self.stats.duration_ms = start.elapsed().as_millis() as u64;
                    warn!(item = index, error = %e, "Item failed, aborting batch");
                    return Err(e);
                }
            }
        }

        self.stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            resource = resource.as_ref().and_then(JsonValue::as_str).unwrap_or_default(),
            operation = operation.as_ref().and_then(JsonValue::as_str).unwrap_or_default(),
            items = self.stats.items_processed,
            records = self.stats.records_emitted,
            failures = self.stats.failures,
            duration_ms = self.stats.duration_ms,
            "Batch complete"
        );

        Ok(records)
    }
}

/// Run a batch on a fresh engine
pub async fn run_batch(
    client: HttpClient,
    source: &dyn ParameterSource,
    item_count: usize,
    continue_on_fail: bool,
) -> Result<Vec<OutputRecord>> {
    BatchEngine::new(client)
        .with_config(BatchConfig::new().with_continue_on_fail(continue_on_fail))
        .run(source, item_count)
        .await
}

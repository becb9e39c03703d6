//! Engine types
//!
//! Output records, configuration and statistics for batch execution.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One record handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    /// Record payload
    pub json: JsonValue,
    /// Index of the input item that produced it
    pub paired_item: usize,
    /// Set only for records built from an item failure
    #[serde(skip)]
    pub error: bool,
}

impl OutputRecord {
    /// Create a record for item `index`
    pub fn new(json: JsonValue, index: usize) -> Self {
        Self {
            json,
            paired_item: index,
            error: false,
        }
    }

    /// Error record `{"error": message}` for item `index`
    pub fn error(message: impl Into<String>, index: usize) -> Self {
        Self {
            error: true,
            ..Self::new(json!({ "error": message.into() }), index)
        }
    }

    /// Whether this record stands in for a failed item
    pub fn is_error(&self) -> bool {
        self.error
    }
}

/// Configuration for batch execution
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Turn item failures into error records instead of aborting
    pub continue_on_fail: bool,
}

impl BatchConfig {
    /// Create a new batch config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set continue-on-failure mode
    #[must_use]
    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }
}

/// Statistics from a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Items processed, failed ones included
    pub items_processed: usize,
    /// Records emitted, error records included
    pub records_emitted: usize,
    /// Items that failed
    pub failures: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl BatchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful item
    pub fn add_success(&mut self, records: usize) {
        self.items_processed += 1;
        self.records_emitted += records;
    }

    /// Record a failed item
    pub fn add_failure(&mut self, emitted_record: bool) {
        self.items_processed += 1;
        self.failures += 1;
        if emitted_record {
            self.records_emitted += 1;
        }
    }
}

//! Persistence shapes
//!
//! The front end owns the actual storage (localStorage); this module only
//! produces and consumes the serialized shapes: the added-rows snapshot as
//! a JSON array-of-arrays of plain cell strings, and the durable error log
//! of `{message, error, timeMs}` entries.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Encode added rows to their persisted JSON shape.
pub fn encode_rows(rows: &[Vec<String>]) -> Result<String> {
    serde_json::to_string(rows).map_err(|e| Error::unexpected("Error saving data", e))
}

/// Decode a persisted snapshot back into rows.
pub fn decode_rows(json: &str) -> Result<Vec<Vec<String>>> {
    serde_json::from_str(json).map_err(|e| Error::unexpected("Error during data recovery", e))
}

/// One logged failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    /// What the session was doing.
    pub message: String,
    /// The failure text.
    pub error: String,
    /// Epoch milliseconds.
    pub time_ms: u64,
}

/// Append-only log of unexpected failures, serializable for durable
/// storage on the JS side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure with the current timestamp.
    pub fn push(&mut self, message: impl Into<String>, error: impl Into<String>) {
        self.entries.push(ErrorEntry {
            message: message.into(),
            error: error.into(),
            time_ms: current_timestamp(),
        });
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.entries).map_err(|e| Error::unexpected("Error log", e))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries = serde_json::from_str(json).map_err(|e| Error::unexpected("Error log", e))?;
        Ok(Self { entries })
    }
}

/// Current time in milliseconds since the Unix epoch.
fn current_timestamp() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

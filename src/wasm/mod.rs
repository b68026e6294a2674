//! WASM bindings for the annotation session

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::{RowOrigin, Session};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed session wrapper
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a new empty session
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Load a CSV file into the table
    #[wasm_bindgen(js_name = loadFile)]
    pub fn load_file(&mut self, name: &str, content: &str) {
        self.session.load_file(name, content);
    }

    /// Truncated file name for display, or null when no file is loaded
    #[wasm_bindgen(js_name = fileDisplayName)]
    pub fn file_display_name(&self, max_graphemes: usize) -> Option<String> {
        self.session
            .selected_file()
            .map(|file| file.display_name(max_graphemes))
    }

    /// Compose a new row from two editor save documents (JSON). Returns
    /// the updated added-rows snapshot JSON for the caller to persist.
    #[wasm_bindgen(js_name = composeRow)]
    pub fn compose_row(
        &mut self,
        instruction_json: &str,
        output_json: &str,
    ) -> Result<String, JsError> {
        self.session
            .compose_row_json(instruction_json, output_json)
            .map_err(into_js_error)
    }

    /// Export the table as a CSV blob
    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> Result<String, JsError> {
        self.session.export().map_err(into_js_error)
    }

    /// Added-rows snapshot JSON (the localStorage shape)
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        self.session.snapshot_json().map_err(into_js_error)
    }

    /// Restore added rows from a persisted snapshot; returns the number of
    /// restored rows. Refused after the first successful restore.
    #[wasm_bindgen(js_name = restoreRows)]
    pub fn restore_rows(&mut self, snapshot_json: &str) -> Result<usize, JsError> {
        self.session.restore(snapshot_json).map_err(into_js_error)
    }

    /// Hide loaded rows, showing only composed ones
    #[wasm_bindgen(js_name = showAddedOnly)]
    pub fn show_added_only(&mut self) {
        self.session.show_added_only();
    }

    /// Show every row
    #[wasm_bindgen(js_name = showAll)]
    pub fn show_all(&mut self) {
        self.session.show_all();
    }

    /// Total row count
    #[wasm_bindgen(js_name = rowCount)]
    pub fn row_count(&self) -> usize {
        self.session.table.row_count()
    }

    /// Table contents for rendering (returns JSON)
    #[wasm_bindgen(js_name = rowsJson)]
    pub fn rows_json(&self) -> Result<String, JsError> {
        let rows: Vec<RowView> = self
            .session
            .table
            .rows()
            .iter()
            .map(|row| RowView {
                cells: row.cells.iter().map(|cell| cell.plain_text()).collect(),
                added: row.origin == RowOrigin::Added,
                hidden: row.hidden,
            })
            .collect();
        serde_json::to_string(&rows).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Error log entries (returns JSON)
    #[wasm_bindgen(js_name = errorLog)]
    pub fn error_log(&self) -> Result<String, JsError> {
        self.session.error_log().to_json().map_err(into_js_error)
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}

fn into_js_error(err: crate::Error) -> JsError {
    JsError::new(&err.to_string())
}

/// Serializable row view for JS
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub cells: Vec<String>,
    pub added: bool,
    pub hidden: bool,
}

//! Annotab: CSV annotation tool core
//!
//! This crate is the pure-data core of a browser-based tool for turning
//! tabular CSV data into instruction/output training pairs:
//! - CSV codec with quote-aware parsing and quoted serialization
//! - Block-to-markup encoder for the external rich-text editor's output
//! - In-memory annotated table with sigil read-back and CSV export
//! - Session state (selected file, error log, added-row persistence shapes)
//!
//! The DOM, the file picker, localStorage and the rich-text widget live in
//! JS; they talk to this core through the WASM bindings in [`wasm`].

pub mod csv;
pub mod error;
pub mod markup;
pub mod persist;
pub mod table;
pub mod text;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmSession;

// Re-export primary types
pub use csv::Row;
pub use error::{Error, Result};
pub use markup::{ContentBlock, EditorDocument};
pub use persist::{ErrorEntry, ErrorLog};
pub use table::{CellNode, NodeClass, RowOrigin, Table, TableCell, TableRow};

use unicode_segmentation::UnicodeSegmentation;

/// The file the session is annotating. Only the name is kept; content goes
/// straight into the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name truncated to at most `max_graphemes` grapheme clusters,
    /// with `...` appended when shortened.
    pub fn display_name(&self, max_graphemes: usize) -> String {
        let graphemes: Vec<&str> = self.name.graphemes(true).collect();
        if graphemes.len() > max_graphemes {
            let mut short = graphemes[..max_graphemes].concat();
            short.push_str("...");
            short
        } else {
            self.name.clone()
        }
    }
}

/// The main session state combining all components.
///
/// Everything the original kept in page-level globals (selected file, the
/// table, the error log, the restore latch) is explicit state here.
pub struct Session {
    pub table: Table,
    selected_file: Option<FileRef>,
    error_log: ErrorLog,
    restored: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with no file loaded.
    pub fn new() -> Self {
        Self {
            table: Table::new(),
            selected_file: None,
            error_log: ErrorLog::new(),
            restored: false,
        }
    }

    /// Load a CSV file: remember its name and replace the table contents.
    pub fn load_file(&mut self, name: &str, content: &str) {
        self.selected_file = Some(FileRef::new(name));
        self.table.load(content);
    }

    pub fn selected_file(&self) -> Option<&FileRef> {
        self.selected_file.as_ref()
    }

    /// Compose a new instruction/output row from editor blocks.
    ///
    /// The instruction is the plain joined text of its blocks; the output
    /// is the sigil markup. Both must be non-empty or the row is refused
    /// and the table is left untouched.
    pub fn compose_row(
        &mut self,
        instruction: &[ContentBlock],
        output: &[ContentBlock],
    ) -> Result<()> {
        let instruction = markup::encode_plain(instruction);
        let output = markup::encode(output);

        if instruction.is_empty() || output.is_empty() {
            return Err(Error::Validation(
                "Fill in the fields \"Instruction\" and \"Output\"",
            ));
        }

        self.table.push_added([
            TableCell::plain(instruction),
            TableCell::plain(output),
        ]);
        Ok(())
    }

    /// JSON-bridge variant of [`Session::compose_row`]: decodes two editor
    /// save documents, composes the row, and returns the updated snapshot
    /// JSON for the caller to persist. Decode and persistence failures are
    /// appended to the error log before being returned.
    pub fn compose_row_json(
        &mut self,
        instruction_json: &str,
        output_json: &str,
    ) -> Result<String> {
        let result = (|| {
            let instruction = EditorDocument::from_json(instruction_json)?.content_blocks();
            let output = EditorDocument::from_json(output_json)?.content_blocks();
            self.compose_row(&instruction, &output)?;
            persist::encode_rows(&self.table.added_snapshot())
        })();

        result.map_err(|err| self.record_failure("Error when creating new data", err))
    }

    /// Export the full table as a CSV blob. Requires a loaded file, since
    /// the export is written back under the original file name.
    pub fn export(&self) -> Result<String> {
        if self.selected_file.is_none() {
            return Err(Error::Validation("File not found!"));
        }
        Ok(self.table.export_csv())
    }

    /// The persisted-snapshot JSON of all added rows.
    pub fn snapshot_json(&self) -> Result<String> {
        persist::encode_rows(&self.table.added_snapshot())
    }

    /// Restore previously persisted rows. Allowed at most once per
    /// session; after a successful restore further attempts are refused.
    /// Returns the number of restored rows.
    pub fn restore(&mut self, snapshot_json: &str) -> Result<usize> {
        if self.restored {
            return Err(Error::Validation("Saved data has already been restored"));
        }

        let rows = persist::decode_rows(snapshot_json)
            .map_err(|err| self.record_failure("Error during data recovery", err))?;

        let count = rows.len();
        self.table.append_restored(rows);
        self.restored = true;
        Ok(count)
    }

    /// Whether a restore has already been applied.
    pub fn restore_applied(&self) -> bool {
        self.restored
    }

    /// Hide loaded rows, showing only composed ones.
    pub fn show_added_only(&mut self) {
        self.table.show_added_only();
    }

    /// Show every row.
    pub fn show_all(&mut self) {
        self.table.show_all();
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Log an unexpected failure and hand the error back. Validation
    /// refusals are not logged; they are ordinary user feedback.
    fn record_failure(&mut self, context: &str, err: Error) -> Error {
        if !err.is_validation() {
            self.error_log.push(context, err.to_string());
        }
        err
    }
}

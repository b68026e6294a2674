//! In-memory annotated table
//!
//! Mirrors the DOM table the front end renders: rows of cells, where each
//! cell holds the child nodes the browser would produce (plain text for
//! loaded CSV data, class-hinted elements for rich content). Newly
//! composed rows are tracked separately from loaded ones so they can be
//! filtered and persisted on their own.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::csv::{self, Row};
use crate::text::{dedup_preserving, normalize_spaces};

/// Class hint carried by a cell's child node, matching the CSS classes the
/// front end assigns to rendered blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Header,
    Paragraph,
    List,
}

/// One child node of a table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellNode {
    pub text: String,
    pub class: Option<NodeClass>,
}

impl CellNode {
    /// A bare text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    /// An element node with a class hint.
    pub fn classed(text: impl Into<String>, class: NodeClass) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }
}

/// Matches text that already carries a header or paragraph sigil. The
/// pattern is deliberately unanchored: a node whose text merely contains
/// `/h ` or `/p ` anywhere is kept verbatim.
static SIGIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"/[ph]\s").expect("valid regex"));

/// One table cell: an ordered list of child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub nodes: SmallVec<[CellNode; 2]>,
}

impl TableCell {
    /// A cell holding a single bare text node.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            nodes: SmallVec::from_iter([CellNode::text(text)]),
        }
    }

    /// The cell's plain text: node texts trimmed and concatenated with
    /// spaces (the `textContent` view used for persistence).
    pub fn plain_text(&self) -> String {
        normalize_spaces(
            &self
                .nodes
                .iter()
                .map(|node| node.text.trim().to_string())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Read the cell back into sigil markup.
    ///
    /// Nodes whose text already contains a `/h ` or `/p ` sigil pass
    /// through unchanged; otherwise the class hint picks the prefix.
    /// List-classed nodes get a bare `/l ` with no index — the encode path
    /// numbers list items, the read-back path does not, and the mismatch
    /// is kept as-is. Unhinted nodes default to `/p `. Duplicate tokens
    /// collapse, first occurrence kept.
    pub fn to_markup(&self) -> String {
        let mut tokens = Vec::new();

        for node in &self.nodes {
            let text = node.text.trim();
            let token = if SIGIL.is_match(text) {
                text.to_string()
            } else {
                match node.class {
                    Some(NodeClass::Header) => format!("/h {text}"),
                    Some(NodeClass::Paragraph) => format!("/p {text}"),
                    Some(NodeClass::List) => format!("/l {text}"),
                    None => format!("/p {text}"),
                }
            };
            tokens.push(token);
        }

        normalize_spaces(&dedup_preserving(tokens).join(" "))
    }
}

/// Where a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrigin {
    /// Parsed from the loaded CSV file.
    Loaded,
    /// Composed in the editor (or restored from a snapshot).
    Added,
}

/// One table row with its visibility state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: SmallVec<[TableCell; 4]>,
    pub origin: RowOrigin,
    pub hidden: bool,
}

impl TableRow {
    fn new(cells: impl IntoIterator<Item = TableCell>, origin: RowOrigin) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            origin,
            hidden: false,
        }
    }
}

/// The annotated table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows with the parsed contents of a CSV blob. Empty
    /// trailing lines become empty rows, as in the source file.
    pub fn load(&mut self, raw: &str) {
        self.rows = csv::parse(raw)
            .into_iter()
            .map(|row| {
                TableRow::new(
                    row.into_iter().map(TableCell::plain),
                    RowOrigin::Loaded,
                )
            })
            .collect();
    }

    /// Append a newly composed row.
    pub fn push_added(&mut self, cells: impl IntoIterator<Item = TableCell>) {
        self.rows.push(TableRow::new(cells, RowOrigin::Added));
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn added_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.origin == RowOrigin::Added)
            .count()
    }

    /// Hide every loaded row, leaving only composed ones visible.
    pub fn show_added_only(&mut self) {
        for row in &mut self.rows {
            row.hidden = row.origin == RowOrigin::Loaded;
        }
    }

    /// Make every row visible again.
    pub fn show_all(&mut self) {
        for row in &mut self.rows {
            row.hidden = false;
        }
    }

    /// Export the whole table (hidden rows included) as CSV.
    ///
    /// Every cell goes through sigil read-back first, then the codec's
    /// serializer applies per-row dedup and quoting.
    pub fn export_csv(&self) -> String {
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| row.cells.iter().map(TableCell::to_markup).collect())
            .collect();
        csv::serialize(&rows)
    }

    /// Plain-text snapshot of the added rows, in insertion order. This is
    /// the array-of-arrays shape the front end persists.
    pub fn added_snapshot(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .filter(|row| row.origin == RowOrigin::Added)
            .map(|row| row.cells.iter().map(TableCell::plain_text).collect())
            .collect()
    }

    /// Re-append previously persisted rows as added rows.
    pub fn append_restored(&mut self, rows: Vec<Vec<String>>) {
        for cells in rows {
            self.push_added(cells.into_iter().map(TableCell::plain));
        }
    }
}

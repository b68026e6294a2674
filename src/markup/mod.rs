//! Block-to-markup encoder
//!
//! The external rich-text editor saves its content as an ordered sequence
//! of typed blocks (`{ type, data: { text?, items? } }`). This module
//! decodes that contract and flattens the blocks into the line-oriented
//! sigil markup used for CSV export:
//!
//! - `/h text` — header
//! - `/p text` — paragraph
//! - `/lN text` — Nth list item, 1-based within its own block
//! - bare text — unrecognized block type

pub mod inline;

pub use inline::format_inline_styles;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::{dedup_preserving, normalize_spaces};

/// The editor's save output: an ordered block sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorDocument {
    pub blocks: Vec<RawBlock>,
}

impl EditorDocument {
    /// Decode the editor's save JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::unexpected("Invalid editor data", e))
    }

    /// The typed view of the blocks.
    pub fn content_blocks(&self) -> Vec<ContentBlock> {
        self.blocks.iter().cloned().map(ContentBlock::from).collect()
    }
}

/// One block as it crosses the bridge. Unknown `type` values are preserved
/// here and mapped to [`ContentBlock::Other`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: BlockData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

/// One structured unit of rich text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Header { text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    Other { text: String },
}

impl From<RawBlock> for ContentBlock {
    fn from(raw: RawBlock) -> Self {
        let text = raw.data.text.unwrap_or_default();
        match raw.kind.as_str() {
            "header" => ContentBlock::Header { text },
            "paragraph" => ContentBlock::Paragraph { text },
            "list" => ContentBlock::List {
                items: raw.data.items.unwrap_or_default(),
            },
            _ => ContentBlock::Other { text },
        }
    }
}

impl ContentBlock {
    pub fn header(text: impl Into<String>) -> Self {
        ContentBlock::Header { text: text.into() }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentBlock::List {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Flatten blocks into the sigil markup string.
///
/// Headers keep their raw text; paragraphs, list items and unrecognized
/// blocks go through [`format_inline_styles`]. List numbering restarts at 1
/// for every list block. The token list is deduplicated (exact string,
/// first occurrence kept), space-joined, whitespace-collapsed and trimmed.
pub fn encode(blocks: &[ContentBlock]) -> String {
    let mut tokens = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Header { text } => {
                tokens.push(format!("/h {}", text.trim()));
            }
            ContentBlock::Paragraph { text } => {
                tokens.push(format!("/p {}", format_inline_styles(text).trim()));
            }
            ContentBlock::List { items } => {
                for (index, item) in items.iter().enumerate() {
                    tokens.push(format!("/l{} {}", index + 1, format_inline_styles(item.trim())));
                }
            }
            ContentBlock::Other { text } => {
                tokens.push(format_inline_styles(text).trim().to_string());
            }
        }
    }

    normalize_spaces(&dedup_preserving(tokens).join(" "))
}

/// Flatten blocks to plain joined text, ignoring sigils and inline styles.
///
/// This is the instruction-field path: only each block's own `text` is
/// used (list items contribute nothing), trimmed and space-joined.
pub fn encode_plain(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            ContentBlock::Header { text }
            | ContentBlock::Paragraph { text }
            | ContentBlock::Other { text } => text.trim(),
            ContentBlock::List { .. } => "",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_header_trims() {
        let out = encode(&[ContentBlock::header(" Title ")]);
        assert_eq!(out, "/h Title");
    }

    #[test]
    fn test_encode_paragraph_formats_inline() {
        let out = encode(&[ContentBlock::paragraph("<b>bold</b> move")]);
        assert_eq!(out, "/p **bold** move");
    }

    #[test]
    fn test_encode_list_numbering_is_per_block() {
        let out = encode(&[ContentBlock::list(["x", "y"])]);
        assert_eq!(out, "/l1 x /l2 y");

        // A second list block restarts at /l1.
        let out = encode(&[ContentBlock::list(["x"]), ContentBlock::list(["y"])]);
        assert_eq!(out, "/l1 x /l1 y");
    }

    #[test]
    fn test_encode_other_has_no_sigil() {
        let out = encode(&[ContentBlock::Other {
            text: "<i>quote</i>".to_string(),
        }]);
        assert_eq!(out, "*quote*");
    }

    #[test]
    fn test_encode_dedups_identical_blocks() {
        let p = ContentBlock::paragraph("same");
        assert_eq!(encode(&[p.clone(), p.clone()]), encode(&[p]));
    }

    #[test]
    fn test_encode_collapses_whitespace() {
        let out = encode(&[
            ContentBlock::header("A  title"),
            ContentBlock::paragraph("  body  "),
        ]);
        assert_eq!(out, "/h A title /p body");
    }

    #[test]
    fn test_encode_empty_blocks() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode(&[ContentBlock::paragraph("")]), "/p");
    }

    #[test]
    fn test_encode_plain_joins_text_only() {
        let out = encode_plain(&[
            ContentBlock::header(" Do this "),
            ContentBlock::paragraph("carefully"),
            ContentBlock::list(["ignored"]),
        ]);
        assert_eq!(out, "Do this carefully ");
    }

    #[test]
    fn test_encode_plain_empty() {
        assert_eq!(encode_plain(&[]), "");
        assert_eq!(encode_plain(&[ContentBlock::paragraph("  ")]), "");
    }

    #[test]
    fn test_decode_editor_json() {
        let json = r#"{
            "blocks": [
                {"type": "header", "data": {"text": "T"}},
                {"type": "list", "data": {"items": ["a", "b"]}},
                {"type": "delimiter", "data": {}}
            ]
        }"#;
        let doc = EditorDocument::from_json(json).unwrap();
        let blocks = doc.content_blocks();
        assert_eq!(blocks[0], ContentBlock::header("T"));
        assert_eq!(blocks[1], ContentBlock::list(["a", "b"]));
        assert_eq!(blocks[2], ContentBlock::Other { text: String::new() });
    }

    #[test]
    fn test_decode_bad_json_is_unexpected() {
        let err = EditorDocument::from_json("not json").unwrap_err();
        assert!(!err.is_validation());
    }
}

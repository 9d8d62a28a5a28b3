//! Story content.
//!
//! Content is a block document: an ordered sequence of typed blocks, each
//! variant carrying only its own payload, so rendering and validation are
//! exhaustively checked. Stories created through the plain-text contribute
//! form carry a legacy text payload until the editor converts it.

use serde::{Deserialize, Serialize};

/// Block editor schema version stamped on converted documents.
const EDITOR_VERSION: &str = "2.26.5";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    Unordered,
}

/// One block of a story document, discriminated by its `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Block {
    /// `header` is the tag older documents carry for headings.
    #[serde(alias = "header")]
    Heading { text: String, level: u8 },
    Paragraph { text: String },
    List { style: ListStyle, items: Vec<String> },
    Code { code: String },
}

/// An ordered block document, matching the editor's save envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl BlockDocument {
    #[must_use]
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            time: Some(chrono::Utc::now().timestamp_millis()),
            blocks,
            version: Some(EDITOR_VERSION.to_string()),
        }
    }
}

/// Story content: either a structured block document or the opaque text a
/// simple contribution submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoryContent {
    Text(String),
    Blocks(BlockDocument),
}

impl StoryContent {
    /// Number of blocks; legacy text counts as zero until converted.
    #[must_use]
    pub fn block_count(&self) -> usize {
        match self {
            Self::Text(_) => 0,
            Self::Blocks(doc) => doc.blocks.len(),
        }
    }

    /// Whether this content satisfies the publish requirement of at least
    /// one block.
    #[must_use]
    pub fn has_blocks(&self) -> bool {
        self.block_count() > 0
    }

    /// Convert to a block document. Legacy text becomes a single paragraph
    /// with newlines preserved as `<br>`, the same shape the editor produces
    /// when it opens a simple contribution.
    #[must_use]
    pub fn into_block_document(self) -> BlockDocument {
        match self {
            Self::Blocks(doc) => doc,
            Self::Text(text) if text.is_empty() => BlockDocument::from_blocks(Vec::new()),
            Self::Text(text) => BlockDocument::from_blocks(vec![Block::Paragraph {
                text: text.replace('\n', "<br>"),
            }]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_block_serde_tag_shape() {
        let block = Block::Heading {
            text: "Narrative".to_string(),
            level: 3,
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"type":"heading","data":{"text":"Narrative","level":3}}"#);
    }

    #[test]
    fn test_heading_accepts_legacy_header_tag() {
        let json = r#"{"type":"header","data":{"text":"Old","level":2}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(
            block,
            Block::Heading {
                text: "Old".to_string(),
                level: 2
            }
        );
    }

    #[test]
    fn test_list_block_round_trip() {
        let block = Block::List {
            style: ListStyle::Unordered,
            items: vec!["light".to_string(), "tunnel".to_string()],
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains(r#""style":"unordered""#));
        let parsed: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, block);
    }

    #[test]
    fn test_content_untagged_text() {
        let content: StoryContent = serde_json::from_str(r#""just a story""#).unwrap();
        assert_eq!(content, StoryContent::Text("just a story".to_string()));
        assert_eq!(content.block_count(), 0);
        assert!(!content.has_blocks());
    }

    #[test]
    fn test_content_untagged_document() {
        let json = r#"{"time":1,"blocks":[{"type":"paragraph","data":{"text":"hi"}}],"version":"2.26.5"}"#;
        let content: StoryContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.block_count(), 1);
        assert!(content.has_blocks());
    }

    #[test]
    fn test_text_conversion_preserves_newlines_as_br() {
        let content = StoryContent::Text("line one\nline two".to_string());
        let doc = content.into_block_document();
        assert_eq!(doc.blocks, vec![paragraph("line one<br>line two")]);
        assert_eq!(doc.version.as_deref(), Some(EDITOR_VERSION));
    }

    #[test]
    fn test_empty_text_converts_to_empty_document() {
        let doc = StoryContent::Text(String::new()).into_block_document();
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_document_without_envelope_fields_parses() {
        let json = r#"{"blocks":[{"type":"code","data":{"code":"let x = 1;"}}]}"#;
        let doc: BlockDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        assert!(doc.time.is_none());
        assert!(doc.version.is_none());
    }
}

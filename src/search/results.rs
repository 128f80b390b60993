use serde::{Serialize, Deserialize};
use unicode_segmentation::UnicodeSegmentation;
use crate::core::types::{DocumentId, Payload};

/// One document matching a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocumentId,
    pub content: HitContent,
}

/// What the registry had for a matching document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitContent {
    /// Leading part of a text payload, cut on a grapheme boundary.
    Excerpt(String),
    /// Payload exists but is opaque bytes; nothing to excerpt.
    Opaque,
    /// Postings reference the document but no payload is registered,
    /// e.g. after importing a snapshot without its document data.
    Missing,
}

impl SearchHit {
    pub fn from_payload(doc_id: DocumentId, payload: Option<&Payload>, excerpt_length: usize) -> Self {
        let content = match payload {
            Some(Payload::Text(text)) => HitContent::Excerpt(excerpt(text, excerpt_length)),
            Some(Payload::Opaque(_)) => HitContent::Opaque,
            None => HitContent::Missing,
        };
        SearchHit { doc_id, content }
    }

    pub fn excerpt(&self) -> Option<&str> {
        match &self.content {
            HitContent::Excerpt(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.content == HitContent::Missing
    }
}

/// First `max_graphemes` grapheme clusters of `text`, with "…" appended when
/// anything was cut.
pub fn excerpt(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max_graphemes).collect();
    if graphemes.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

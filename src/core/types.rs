use serde::{Serialize, Deserialize};
use std::fmt;

/// Caller-supplied document identifier. Uniqueness is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        DocumentId(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        DocumentId(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document body as held by the registry. Stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Plaintext content; search hits carry an excerpt of it.
    Text(String),
    /// Bytes the core never interprets, e.g. ciphertext from the caller.
    Opaque(Vec<u8>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Opaque(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Opaque(bytes)
    }
}

/// Ingestion input: text to index plus the payload to register for it.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub doc_id: DocumentId,
    pub content: String,
    /// Payload to store instead of `content`, e.g. its ciphertext.
    pub payload: Option<Payload>,
}

impl NewDocument {
    pub fn new(doc_id: impl Into<DocumentId>, content: impl Into<String>) -> Self {
        NewDocument {
            doc_id: doc_id.into(),
            content: content.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

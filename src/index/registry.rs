use std::collections::HashMap;
use crate::core::types::{DocumentId, Payload};

/// DocumentId -> payload. Payloads go in and come out untouched.
#[derive(Debug, Default, Clone)]
pub struct DocumentRegistry {
    documents: HashMap<DocumentId, Payload>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        DocumentRegistry::default()
    }

    /// Store `payload` under `doc_id`, returning whatever it replaced.
    pub fn put(&mut self, doc_id: DocumentId, payload: Payload) -> Option<Payload> {
        self.documents.insert(doc_id, payload)
    }

    pub fn get(&self, doc_id: &DocumentId) -> Option<&Payload> {
        self.documents.get(doc_id)
    }

    pub fn remove(&mut self, doc_id: &DocumentId) -> Option<Payload> {
        self.documents.remove(doc_id)
    }

    pub fn contains(&self, doc_id: &DocumentId) -> bool {
        self.documents.contains_key(doc_id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn payload_bytes(&self) -> usize {
        self.documents.values().map(Payload::len).sum()
    }
}

use std::path::Path;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use crate::analysis::keyed::{MasterKey, TokenDeriver};
use crate::analysis::token::{Term, TokenId};
use crate::analysis::tokenizer::query_term;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::stats::IndexStats;
use crate::core::types::{DocumentId, NewDocument, Payload};
use crate::index::posting::PostingStore;
use crate::index::registry::DocumentRegistry;
use crate::parallel::indexer::{index_batch, index_document, IndexedDoc};
use crate::search::results::SearchHit;
use crate::storage::snapshot::Snapshot;

/// Everything a writer mutates. Lives behind one lock so a reader never sees
/// a half-applied document or import.
#[derive(Default)]
struct IndexState {
    postings: PostingStore,
    documents: DocumentRegistry,
    last_snapshot_import: Option<DateTime<Utc>>,
}

impl IndexState {
    /// Register the payload and replace the document's postings. Returns the
    /// number of stale postings retracted.
    fn apply(&mut self, doc: IndexedDoc) -> usize {
        let retracted = self.postings.remove_postings_for_document(&doc.doc_id);
        for token in doc.tokens {
            self.postings.add_posting(token, doc.doc_id.clone());
        }
        self.documents.put(doc.doc_id, doc.payload);
        retracted
    }
}

/// Keyed-token inverted index.
///
/// Terms are turned into HMAC-SHA-256 tokens under the engine's master key
/// before they reach the posting store, so neither the index nor its
/// snapshots contain plaintext vocabulary. Lookups are exact-term only.
///
/// Writers (`add_*`, `remove_document`, `import_snapshot`) take the state lock
/// exclusively; `search` and `export_snapshot` share it. Tokenization and
/// HMAC work happen before the lock is taken.
pub struct IndexEngine {
    config: EngineConfig,
    deriver: TokenDeriver,
    state: RwLock<IndexState>,
}

impl IndexEngine {
    pub fn new(key: MasterKey) -> Result<Self> {
        Self::with_config(key, EngineConfig::default())
    }

    pub fn with_config(key: MasterKey, config: EngineConfig) -> Result<Self> {
        Ok(IndexEngine {
            config,
            deriver: TokenDeriver::new(key)?,
            state: RwLock::new(IndexState::default()),
        })
    }

    pub fn derive_token(&self, term: &Term) -> TokenId {
        self.deriver.derive(term)
    }

    /// Token the query string would be looked up under, if it has any term.
    pub fn token_for(&self, query: &str) -> Option<TokenId> {
        query_term(query).map(|term| self.deriver.derive(&term))
    }

    /// Index `content` under `doc_id` and store it as the document's payload.
    ///
    /// Re-adding an existing id first retracts every posting from its
    /// previous version.
    pub fn add_document(&self, doc_id: impl Into<DocumentId>, content: &str) {
        self.ingest(NewDocument::new(doc_id, content));
    }

    /// Index `content` but register `payload` (typically its ciphertext)
    /// instead of the plaintext.
    pub fn add_document_with_payload(
        &self,
        doc_id: impl Into<DocumentId>,
        content: &str,
        payload: Payload,
    ) {
        self.ingest(NewDocument::new(doc_id, content).with_payload(payload));
    }

    fn ingest(&self, doc: NewDocument) {
        let indexed = index_document(&self.deriver, doc);
        let doc_id = indexed.doc_id.clone();
        let token_count = indexed.tokens.len();

        let retracted = self.state.write().apply(indexed);
        debug!(doc_id = %doc_id, tokens = token_count, retracted, "indexed document");
    }

    /// Index a batch under a single write lock. Tokens are derived in
    /// parallel beforehand. Returns the number of documents applied.
    pub fn add_documents(&self, documents: Vec<NewDocument>) -> usize {
        let indexed = index_batch(&self.deriver, documents);
        let count = indexed.len();

        let mut state = self.state.write();
        let retracted: usize = indexed.into_iter().map(|doc| state.apply(doc)).sum();
        drop(state);

        debug!(documents = count, retracted, "indexed batch");
        count
    }

    /// Drop a document's postings and payload. Returns whether it was known.
    pub fn remove_document(&self, doc_id: &DocumentId) -> bool {
        let mut state = self.state.write();
        let retracted = state.postings.remove_postings_for_document(doc_id);
        let had_payload = state.documents.remove(doc_id).is_some();
        drop(state);

        debug!(doc_id = %doc_id, retracted, "removed document");
        had_payload || retracted > 0
    }

    /// Exact-term search. Only the first term of `query` is used.
    ///
    /// Hits are ordered by document id. A document with postings but no
    /// registered payload comes back as [`HitContent::Missing`](crate::search::results::HitContent::Missing).
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let Some(token) = self.token_for(query) else {
            return Vec::new();
        };

        let state = self.state.read();
        let Some(doc_ids) = state.postings.get(&token) else {
            return Vec::new();
        };

        doc_ids
            .iter()
            .map(|doc_id| {
                SearchHit::from_payload(
                    doc_id.clone(),
                    state.documents.get(doc_id),
                    self.config.excerpt_length,
                )
            })
            .collect()
    }

    pub fn get_document(&self, doc_id: &DocumentId) -> Option<Payload> {
        self.state.read().documents.get(doc_id).cloned()
    }

    pub fn contains_document(&self, doc_id: &DocumentId) -> bool {
        self.state.read().documents.contains(doc_id)
    }

    pub fn document_count(&self) -> usize {
        self.state.read().documents.len()
    }

    /// Consistent copy of the current posting state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_store(&self.state.read().postings)
    }

    /// Canonical JSON encoding of the posting store. Payloads are excluded.
    pub fn export_snapshot(&self) -> Result<Vec<u8>> {
        let snapshot = self.snapshot();
        let bytes = snapshot.to_bytes(self.config.pretty_snapshots)?;
        info!(tokens = snapshot.len(), bytes = bytes.len(), "exported snapshot");
        Ok(bytes)
    }

    /// Replace the posting store with the decoded snapshot.
    ///
    /// The snapshot is fully validated before the lock is taken; on error the
    /// engine is left exactly as it was. Registered payloads are not touched.
    pub fn import_snapshot(&self, bytes: &[u8]) -> Result<()> {
        let snapshot = Snapshot::from_bytes(bytes).inspect_err(|e| {
            warn!(bytes = bytes.len(), error = %e, "rejected snapshot");
        })?;
        self.replace_postings(snapshot);
        Ok(())
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot();
        snapshot.save(path, self.config.pretty_snapshots)?;
        info!(path = %path.display(), tokens = snapshot.len(), "saved snapshot");
        Ok(())
    }

    pub fn load_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = Snapshot::load(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "could not load snapshot");
        })?;
        self.replace_postings(snapshot);
        Ok(())
    }

    fn replace_postings(&self, snapshot: Snapshot) {
        let tokens = snapshot.len();
        let postings = snapshot.into_store();

        let mut state = self.state.write();
        state.postings = postings;
        state.last_snapshot_import = Some(Utc::now());
        drop(state);

        info!(tokens, "imported snapshot");
    }

    pub fn stats(&self) -> IndexStats {
        let state = self.state.read();
        IndexStats {
            document_count: state.documents.len(),
            indexed_document_count: state.postings.document_count(),
            token_count: state.postings.token_count(),
            posting_count: state.postings.posting_count(),
            payload_bytes: state.documents.payload_bytes(),
            last_snapshot_import: state.last_snapshot_import,
        }
    }
}

impl std::fmt::Debug for IndexEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexEngine")
            .field("config", &self.config)
            .field("deriver", &self.deriver)
            .finish_non_exhaustive()
    }
}

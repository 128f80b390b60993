pub mod core;
pub mod analysis;
pub mod index;
pub mod search;
pub mod storage;
pub mod parallel;

pub use crate::analysis::keyed::MasterKey;
pub use crate::analysis::token::{Term, TokenId};
pub use crate::analysis::tokenizer::tokenize;
pub use crate::core::config::EngineConfig;
pub use crate::core::engine::IndexEngine;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::stats::IndexStats;
pub use crate::core::types::{DocumentId, NewDocument, Payload};
pub use crate::search::results::{HitContent, SearchHit};
pub use crate::storage::snapshot::Snapshot;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          CIPHERDEX STRUCT ARCHITECTURE                       │
└──────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── CORE LAYER ────────────────────────────────┐
│  struct IndexEngine                                                          │
│  • config: EngineConfig              // excerpt length, snapshot formatting  │
│  • deriver: TokenDeriver             // HMAC-SHA-256 keyed with MasterKey    │
│  • state: RwLock<IndexState>         // one lock for postings + documents    │
│      ├─ postings: PostingStore                                               │
│      ├─ documents: DocumentRegistry                                          │
│      └─ last_snapshot_import: Option<DateTime<Utc>>                          │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── ANALYSIS LAYER ───────────────────────────────┐
│  tokenize(text) ──► Vec<Term> ──► TokenDeriver::derive ──► TokenId [u8; 32]  │
│  (lowercase, split on non-alphanumeric)          (never leaves as plaintext) │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── INDEX LAYER ─────────────────────────────────┐
│  PostingStore                         DocumentRegistry                       │
│  • postings: BTreeMap<TokenId,        • documents: HashMap<DocumentId,       │
│               BTreeSet<DocumentId>>                Payload>                  │
│  • doc_tokens: HashMap<DocumentId,                                           │
│               BTreeSet<TokenId>>      Payload::Text | Payload::Opaque        │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── STORAGE LAYER ────────────────────────────────┐
│  Snapshot ⇄ JSON {"<hex token>": ["doc", ...]}  (sorted keys, sorted lists)  │
│  postings only; payloads are persisted by the caller                         │
└──────────────────────────────────────────────────────────────────────────────┘

Ingestion:  add_document ─► index_document (no lock) ─► write lock ─► apply
Query:      search ─► query_term ─► derive ─► read lock ─► postings ─► registry
Snapshot:   export_snapshot (read lock) / import_snapshot (validate, then swap)
*/

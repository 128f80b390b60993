use std::collections::BTreeSet;
use rayon::prelude::*;
use crate::analysis::keyed::TokenDeriver;
use crate::analysis::token::TokenId;
use crate::analysis::tokenizer::unique_terms;
use crate::core::types::{DocumentId, NewDocument, Payload};

/// Batches smaller than this are derived on the calling thread.
const PARALLEL_THRESHOLD: usize = 16;

/// A document whose tokens have been derived but not yet applied to an index.
#[derive(Debug, Clone)]
pub struct IndexedDoc {
    pub doc_id: DocumentId,
    pub payload: Payload,
    pub tokens: BTreeSet<TokenId>,
}

/// Tokenize and derive tokens for one document. Holds no index lock.
pub fn index_document(deriver: &TokenDeriver, doc: NewDocument) -> IndexedDoc {
    let tokens = unique_terms(&doc.content)
        .iter()
        .map(|term| deriver.derive(term))
        .collect();

    IndexedDoc {
        doc_id: doc.doc_id,
        payload: doc.payload.unwrap_or_else(|| Payload::from(doc.content)),
        tokens,
    }
}

/// Derive a whole batch, in parallel once it is large enough. Input order is
/// preserved so later duplicates still win when applied.
pub fn index_batch(deriver: &TokenDeriver, documents: Vec<NewDocument>) -> Vec<IndexedDoc> {
    if documents.len() < PARALLEL_THRESHOLD {
        return documents
            .into_iter()
            .map(|doc| index_document(deriver, doc))
            .collect();
    }

    documents
        .into_par_iter()
        .map(|doc| index_document(deriver, doc))
        .collect()
}

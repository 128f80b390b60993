use std::collections::{BTreeMap, BTreeSet, HashMap};
use crate::analysis::token::TokenId;
use crate::core::types::DocumentId;

/// Posting list for a token.
/// Note: kept sorted by document id so exports need no extra sort pass.
pub type PostingList = BTreeSet<DocumentId>;

/// Inverted index over derived tokens: TokenId -> set of DocumentId.
///
/// A reverse map from each document to the tokens it posted under is kept
/// alongside, so retracting a document touches only its own postings.
#[derive(Debug, Default, Clone)]
pub struct PostingStore {
    postings: BTreeMap<TokenId, PostingList>,
    doc_tokens: HashMap<DocumentId, BTreeSet<TokenId>>,
}

impl PostingStore {
    pub fn new() -> Self {
        PostingStore::default()
    }

    /// Build a store from (token, documents) entries, e.g. a decoded snapshot.
    /// Empty lists are dropped.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TokenId, Vec<DocumentId>)>,
    {
        let mut store = PostingStore::new();
        for (token, docs) in entries {
            for doc_id in docs {
                store.add_posting(token, doc_id);
            }
        }
        store
    }

    /// Idempotent.
    pub fn add_posting(&mut self, token: TokenId, doc_id: DocumentId) {
        self.doc_tokens
            .entry(doc_id.clone())
            .or_default()
            .insert(token);
        self.postings
            .entry(token)
            .or_default()
            .insert(doc_id);
    }

    /// Documents posted under `token`; empty when the token is unknown.
    pub fn lookup(&self, token: &TokenId) -> PostingList {
        self.postings.get(token).cloned().unwrap_or_default()
    }

    /// Borrowing variant of [`lookup`](Self::lookup).
    pub fn get(&self, token: &TokenId) -> Option<&PostingList> {
        self.postings.get(token)
    }

    /// Remove `doc_id` from every posting list it appears in, pruning lists
    /// that become empty. Returns how many postings were removed.
    pub fn remove_postings_for_document(&mut self, doc_id: &DocumentId) -> usize {
        let Some(tokens) = self.doc_tokens.remove(doc_id) else {
            return 0;
        };

        for token in &tokens {
            if let Some(list) = self.postings.get_mut(token) {
                list.remove(doc_id);
                if list.is_empty() {
                    self.postings.remove(token);
                }
            }
        }
        tokens.len()
    }

    /// Every (token, documents) pair, tokens ascending, documents ascending.
    pub fn all_entries(&self) -> Vec<(TokenId, Vec<DocumentId>)> {
        self.postings
            .iter()
            .map(|(token, docs)| (*token, docs.iter().cloned().collect()))
            .collect()
    }

    pub fn contains_document(&self, doc_id: &DocumentId) -> bool {
        self.doc_tokens.contains_key(doc_id)
    }

    /// Number of distinct tokens.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of documents with at least one posting.
    pub fn document_count(&self) -> usize {
        self.doc_tokens.len()
    }

    /// Total (token, document) pairs.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(|docs| docs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TOKEN_LEN;

    fn token(n: u8) -> TokenId {
        TokenId::from_bytes([n; TOKEN_LEN])
    }

    fn doc(id: &str) -> DocumentId {
        DocumentId::from(id)
    }

    #[test]
    fn test_add_posting_is_idempotent() {
        let mut store = PostingStore::new();
        store.add_posting(token(1), doc("a"));
        store.add_posting(token(1), doc("a"));

        assert_eq!(store.lookup(&token(1)).len(), 1);
        assert_eq!(store.posting_count(), 1);
    }

    #[test]
    fn test_lookup_unknown_token_is_empty() {
        let store = PostingStore::new();
        assert!(store.lookup(&token(9)).is_empty());
        assert!(store.get(&token(9)).is_none());
    }

    #[test]
    fn test_remove_postings_for_document_prunes() {
        let mut store = PostingStore::new();
        store.add_posting(token(1), doc("a"));
        store.add_posting(token(1), doc("b"));
        store.add_posting(token(2), doc("a"));

        assert_eq!(store.remove_postings_for_document(&doc("a")), 2);
        assert_eq!(store.lookup(&token(1)).into_iter().collect::<Vec<_>>(), vec![doc("b")]);
        assert!(store.get(&token(2)).is_none());
        assert!(!store.contains_document(&doc("a")));
        assert_eq!(store.token_count(), 1);

        // unknown document is a no-op
        assert_eq!(store.remove_postings_for_document(&doc("zzz")), 0);
    }

    #[test]
    fn test_all_entries_sorted() {
        let mut store = PostingStore::new();
        store.add_posting(token(3), doc("b"));
        store.add_posting(token(1), doc("c"));
        store.add_posting(token(3), doc("a"));

        let entries = store.all_entries();
        assert_eq!(
            entries,
            vec![
                (token(1), vec![doc("c")]),
                (token(3), vec![doc("a"), doc("b")]),
            ]
        );
    }

    #[test]
    fn test_from_entries_rebuilds_reverse_map() {
        let store = PostingStore::from_entries(vec![
            (token(1), vec![doc("a"), doc("a"), doc("b")]),
            (token(2), vec![]),
        ]);

        assert_eq!(store.token_count(), 1);
        assert_eq!(store.posting_count(), 2);
        assert!(store.contains_document(&doc("b")));

        let mut store = store;
        store.remove_postings_for_document(&doc("a"));
        store.remove_postings_for_document(&doc("b"));
        assert!(store.is_empty());
    }
}

//! Property checks for token derivation and snapshot round-trips.

use std::collections::BTreeSet;
use cipherdex::{tokenize, IndexEngine, MasterKey, NewDocument};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

fn engine(key: &[u8]) -> IndexEngine {
    IndexEngine::new(MasterKey::new(key.to_vec())).unwrap()
}

fn corpus() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-e]{1,3}", "[a-zA-Z0-9 ,.-]{0,40}"), 0..20)
}

proptest! {
    #[test]
    fn prop_token_derivation_is_deterministic(key in prop::collection::vec(any::<u8>(), 1..64), word in "[a-z0-9]{1,16}") {
        let first = engine(&key);
        let second = engine(&key);
        prop_assert_eq!(first.token_for(&word), first.token_for(&word));
        prop_assert_eq!(first.token_for(&word), second.token_for(&word));
    }

    #[test]
    fn prop_terms_are_lowercase_letter_runs(text in "\\PC{0,64}") {
        for term in tokenize(&text) {
            prop_assert!(!term.as_str().is_empty());
            // every grapheme cluster is based on a letter or digit
            prop_assert!(term
                .as_str()
                .graphemes(true)
                .all(|g| g.chars().next().is_some_and(char::is_alphanumeric)));
            prop_assert_eq!(term.as_str().to_lowercase(), term.as_str());
            // a term re-tokenizes to itself
            let again = tokenize(term.as_str());
            prop_assert_eq!(again.len(), 1);
            prop_assert_eq!(again[0].as_str(), term.as_str());
        }
    }

    #[test]
    fn prop_snapshot_round_trip_preserves_lookups(docs in corpus()) {
        let source = engine(b"prop-key");
        for (id, content) in &docs {
            source.add_document(id.as_str(), content);
        }

        let bytes = source.export_snapshot().unwrap();
        let restored = engine(b"prop-key");
        restored.import_snapshot(&bytes).unwrap();

        let terms: BTreeSet<String> = docs
            .iter()
            .flat_map(|(_, content)| tokenize(content))
            .map(|term| term.as_str().to_string())
            .collect();
        for term in &terms {
            let expected: Vec<_> = source.search(term).into_iter().map(|h| h.doc_id).collect();
            let actual: Vec<_> = restored.search(term).into_iter().map(|h| h.doc_id).collect();
            prop_assert_eq!(actual, expected);
        }
        prop_assert_eq!(restored.export_snapshot().unwrap(), bytes);
    }

    #[test]
    fn prop_index_reflects_latest_version_only(docs in corpus()) {
        let engine = engine(b"prop-key");
        engine.add_documents(docs.iter().map(|(id, c)| NewDocument::new(id.as_str(), c.as_str())).collect());

        // last write per id wins
        let mut latest = std::collections::BTreeMap::new();
        for (id, content) in &docs {
            latest.insert(id.clone(), content.clone());
        }

        for (id, content) in &latest {
            for term in tokenize(content) {
                let hits = engine.search(term.as_str());
                prop_assert!(hits.iter().any(|h| h.doc_id.as_str() == id));
            }
        }

        let all_terms: BTreeSet<String> = docs
            .iter()
            .flat_map(|(_, content)| tokenize(content))
            .map(|term| term.as_str().to_string())
            .collect();
        for term in &all_terms {
            for hit in engine.search(term) {
                let current = &latest[hit.doc_id.as_str()];
                prop_assert!(tokenize(current).iter().any(|t| t.as_str() == term));
            }
        }
    }
}

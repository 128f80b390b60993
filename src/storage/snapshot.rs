//! Portable snapshot of the posting store.
//!
//! Wire format is a single JSON object mapping each token (64 lowercase hex
//! characters) to the array of document ids posted under it:
//!
//! ```json
//! {"0f3a…":["doc1","doc2"],"9bc4…":["doc2"]}
//! ```
//!
//! Keys are emitted in ascending order and every array is sorted ascending,
//! so the same posting state always encodes to the same bytes. Document
//! payloads are never part of a snapshot.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use crate::analysis::token::TokenId;
use crate::core::error::{Error, Result};
use crate::core::types::DocumentId;
use crate::index::posting::PostingStore;

/// Top-level JSON object as written, keys in document order with repeats
/// kept, so duplicate tokens can be rejected instead of silently collapsed.
struct WireEntries(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for WireEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = WireEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of token ids to arrays of document ids")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<WireEntries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(WireEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Decoded, validated snapshot in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<TokenId, BTreeSet<DocumentId>>,
}

impl Snapshot {
    pub fn from_store(store: &PostingStore) -> Self {
        let entries = store
            .all_entries()
            .into_iter()
            .map(|(token, docs)| (token, docs.into_iter().collect()))
            .collect();
        Snapshot { entries }
    }

    /// Consume the snapshot into a fresh posting store.
    pub fn into_store(self) -> PostingStore {
        PostingStore::from_entries(
            self.entries
                .into_iter()
                .map(|(token, docs)| (token, docs.into_iter().collect())),
        )
    }

    pub fn entries(&self) -> impl Iterator<Item = (&TokenId, &BTreeSet<DocumentId>)> {
        self.entries.iter()
    }

    /// Number of tokens carried.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_bytes(&self, pretty: bool) -> Result<Vec<u8>> {
        let wire: BTreeMap<String, Vec<&DocumentId>> = self
            .entries
            .iter()
            .map(|(token, docs)| (token.to_hex(), docs.iter().collect()))
            .collect();

        let bytes = if pretty {
            serde_json::to_vec_pretty(&wire)?
        } else {
            serde_json::to_vec(&wire)?
        };
        Ok(bytes)
    }

    /// Parse and validate. Anything that is not an object of hex-token keys
    /// to arrays of strings is a `MalformedSnapshot` error, as is a token
    /// that appears more than once (hex case is not significant).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let WireEntries(wire) = serde_json::from_slice(bytes)?;

        let mut decoded: BTreeMap<TokenId, BTreeSet<DocumentId>> = BTreeMap::new();
        for (key, docs) in wire {
            let token = TokenId::from_hex(&key)?;
            match decoded.entry(token) {
                Entry::Occupied(_) => {
                    return Err(Error::malformed_snapshot(format!(
                        "token {} appears more than once",
                        token
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(docs.into_iter().map(DocumentId::from).collect());
                }
            }
        }

        decoded.retain(|_, docs| !docs.is_empty());
        Ok(Snapshot { entries: decoded })
    }

    pub fn save(&self, path: &Path, pretty: bool) -> Result<()> {
        let data = self.to_bytes(pretty)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Snapshot::from_bytes(&data)
    }
}

use super::content::Content;
use super::hash::Hash;
use super::traits::CAS;
use log::trace;
use std::collections::HashMap;

/// Type Storage provides an in-memory content-addressible storage pool, keyed by the hash of
/// each encoded object.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Storage {
    map: HashMap<Hash, Content>,
}

impl Storage {
    /// Create a new, empty storage pool.
    pub fn new() -> Storage {
        Storage {
            map: HashMap::new(),
        }
    }

    /// Number of distinct objects stored.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Move already-hashed content into this pool.  Used to publish the objects written by a
    /// successful transaction.
    pub(crate) fn absorb(&mut self, pending: HashMap<Hash, Content>) {
        for (hash, content) in pending {
            self.map.entry(hash).or_insert(content);
        }
    }
}

impl CAS for Storage {
    fn store(&mut self, encoded: Vec<u8>) -> Hash {
        let content = Content::new(encoded);
        let hash = content.hash();
        // hash collisions are treated as equality, so an existing entry is never replaced
        if self.map.contains_key(&hash) {
            trace!("object {} already stored", hash);
        } else {
            trace!("storing object {} ({} bytes)", hash, content.len());
            self.map.insert(hash.clone(), content);
        }
        hash
    }

    fn retrieve(&self, hash: &Hash) -> Option<&[u8]> {
        self.map.get(hash).map(Content::bytes)
    }
}

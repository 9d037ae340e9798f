use super::content::Content;
use super::hash::Hash;
use super::storage::Storage;
use super::traits::CAS;
use log::trace;
use std::collections::HashMap;

/// A Transaction layers pending writes over a read-only Storage.  Reads see both the pending
/// and the stored objects; writes go only to the pending set.  Nothing reaches the Storage until
/// the caller hands the transaction to `Storage::absorb` via `into_pending`, so dropping a
/// transaction discards everything written through it.
#[derive(Debug)]
pub struct Transaction<'s> {
    base: &'s Storage,
    pending: HashMap<Hash, Content>,
}

impl<'s> Transaction<'s> {
    pub fn new(base: &'s Storage) -> Transaction<'s> {
        Transaction {
            base,
            pending: HashMap::new(),
        }
    }

    /// Number of objects written in this transaction that the base does not already hold.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn into_pending(self) -> HashMap<Hash, Content> {
        self.pending
    }
}

impl<'s> CAS for Transaction<'s> {
    fn store(&mut self, encoded: Vec<u8>) -> Hash {
        let content = Content::new(encoded);
        let hash = content.hash();
        if self.base.contains(&hash) || self.pending.contains_key(&hash) {
            trace!("object {} already stored", hash);
        } else {
            trace!("staging object {} ({} bytes)", hash, content.len());
            self.pending.insert(hash.clone(), content);
        }
        hash
    }

    fn retrieve(&self, hash: &Hash) -> Option<&[u8]> {
        match self.pending.get(hash) {
            Some(content) => Some(content.bytes()),
            None => self.base.retrieve(hash),
        }
    }
}

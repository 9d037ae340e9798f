use super::hash::Hash;

/// Content Addressible Storage
///
/// When values are stored in this structure, their contents are hashed and the hash
/// is returned.  The value can later be retrieved by that hash.
///
/// Storage is append-only: nothing stored is ever modified or removed.
pub trait CAS {
    /// Store encoded content into the storage pool, returning its hash.
    ///
    /// Inserting the same value twice will result in the same Hash (and no additional use of
    /// space).
    fn store(&mut self, encoded: Vec<u8>) -> Hash;

    /// Retrieve encoded content by hash.
    fn retrieve(&self, hash: &Hash) -> Option<&[u8]>;

    /// Does the storage contain content with this hash?
    fn contains(&self, hash: &Hash) -> bool {
        self.retrieve(hash).is_some()
    }
}

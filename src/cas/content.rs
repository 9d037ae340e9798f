use super::hash::Hash;

/// Type Content represents the encoded bytes of one stored object.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Content(Vec<u8>);

impl Content {
    pub fn new(encoded: Vec<u8>) -> Content {
        Content(encoded)
    }

    pub fn hash(&self) -> Hash {
        Hash::for_bytes(&self.0)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

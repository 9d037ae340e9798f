use super::codec::{unframe, Decoder};
use super::commit::Commit;
use super::tree::Tree;
use crate::cas::{Hash, CAS};
use crate::error::*;
use serde::Serialize;

pub(crate) const BLOB: &str = "blob";
pub(crate) const TREE: &str = "tree";
pub(crate) const COMMIT: &str = "commit";

/// Objects get encoded into the CAS, but are interlinked with hashes
/// instead of references.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Object {
    /// A blob is the content of one file at one point in time
    Blob { data: Vec<u8> },

    /// A tree is a snapshot of one directory
    Tree(Tree),

    /// A commit is one point in history, linking a tree to its parent commit
    Commit(Commit),
}

impl Object {
    pub fn blob(data: Vec<u8>) -> Object {
        Object::Blob { data }
    }

    /// The kind tag of this object, as used in its encoding.
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Blob { .. } => BLOB,
            Object::Tree(_) => TREE,
            Object::Commit(_) => COMMIT,
        }
    }

    /// The canonical encoding of this object; its hash is the hash of these bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Object::Blob { data } => super::codec::frame(BLOB, data),
            Object::Tree(tree) => tree.encode(),
            Object::Commit(commit) => commit.encode(),
        }
    }

    /// Compute this object's hash without storing it.
    pub fn hash(&self) -> Hash {
        Hash::for_bytes(&self.encode())
    }

    /// Decode an object from its stored encoding.  The hash is used only for error reporting.
    pub fn decode(hash: &Hash, encoded: &[u8]) -> Result<Object> {
        let corrupt = |reason: String| Error::CorruptObject {
            hash: hash.clone(),
            reason,
        };

        let (kind, payload) = unframe(encoded).map_err(corrupt)?;
        match kind {
            BLOB => Ok(Object::Blob {
                data: payload.to_vec(),
            }),
            TREE => {
                let mut dec = Decoder::new(payload);
                let tree = Tree::decode(&mut dec).map_err(corrupt)?;
                dec.finish().map_err(corrupt)?;
                Ok(Object::Tree(tree))
            }
            COMMIT => {
                let mut dec = Decoder::new(payload);
                let commit = Commit::decode(&mut dec).map_err(corrupt)?;
                dec.finish().map_err(corrupt)?;
                Ok(Object::Commit(commit))
            }
            other => Err(corrupt(format!("unknown kind {:?}", other))),
        }
    }

    /// Store this object, returning its hash.  Storing an object that is already present is a
    /// no-op that returns the same hash.
    ///
    /// A commit is refused unless its tree and its parent (if any) are already stored, so the
    /// commit chain can never contain a cycle.
    pub fn store_in<C: CAS + ?Sized>(&self, cas: &mut C) -> Result<Hash> {
        if let Object::Commit(commit) = self {
            commit.check_links(cas)?;
        }
        Ok(cas.store(self.encode()))
    }

    /// Retrieve the object with the given hash, failing with `ObjectNotFound` if there is none.
    pub fn retrieve_from<C: CAS + ?Sized>(cas: &C, hash: &Hash) -> Result<Object> {
        match cas.retrieve(hash) {
            None => Err(Error::ObjectNotFound(hash.clone())),
            Some(encoded) => Object::decode(hash, encoded),
        }
    }
}

/// Fail with `UnexpectedKind` for an object that is not of the expected kind.
pub(crate) fn unexpected(hash: &Hash, expected: &'static str, found: &Object) -> Error {
    Error::UnexpectedKind {
        hash: hash.clone(),
        expected,
        found: found.kind(),
    }
}

/// Retrieve a blob's content by hash.
pub fn retrieve_blob<C: CAS + ?Sized>(cas: &C, hash: &Hash) -> Result<Vec<u8>> {
    match Object::retrieve_from(cas, hash)? {
        Object::Blob { data } => Ok(data),
        other => Err(unexpected(hash, BLOB, &other)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cas::Storage;
    use crate::fs::EntryKind;

    #[test]
    fn blob_round_trip() {
        let mut storage = Storage::new();
        let hash = Object::blob(b"hello".to_vec()).store_in(&mut storage).unwrap();
        assert_eq!(retrieve_blob(&storage, &hash).unwrap(), b"hello".to_vec());
    }

    #[test]
    fn blob_hash_is_tagged() {
        // sha256(b"blob \0\0\0\0\0\0\0\x05hello")
        assert_eq!(
            Object::blob(b"hello".to_vec()).hash().to_hex(),
            crate::fs::test_hashes::HELLO_BLOB
        );
        assert_ne!(Object::blob(b"hello".to_vec()).hash(), Hash::for_bytes(b"hello"));
    }

    #[test]
    fn kinds_never_collide() {
        // a blob whose bytes are exactly an encoded empty tree's payload still hashes
        // differently from the tree
        let tree = Object::Tree(Tree::new());
        let blob = Object::blob(vec![0, 0, 0, 0]);
        assert_ne!(tree.hash(), blob.hash());
    }

    #[test]
    fn store_is_idempotent() {
        let mut storage = Storage::new();
        let obj = Object::blob(b"same".to_vec());
        let hash1 = obj.store_in(&mut storage).unwrap();
        let hash2 = obj.store_in(&mut storage).unwrap();
        assert_eq!(hash1, hash2);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn retrieve_missing() {
        let storage = Storage::new();
        let hash = Hash::for_bytes(b"nothing");
        assert_eq!(
            Object::retrieve_from(&storage, &hash),
            Err(Error::ObjectNotFound(hash))
        );
    }

    #[test]
    fn retrieve_wrong_kind() {
        let mut storage = Storage::new();
        let hash = Object::Tree(Tree::new()).store_in(&mut storage).unwrap();
        assert_eq!(
            retrieve_blob(&storage, &hash),
            Err(Error::UnexpectedKind {
                hash,
                expected: "blob",
                found: "tree"
            })
        );
    }

    #[test]
    fn decode_garbage() {
        let hash = Hash::for_bytes(b"x");
        match Object::decode(&hash, b"frob \0\0\0\0\0\0\0\0") {
            Err(Error::CorruptObject { reason, .. }) => assert!(reason.contains("frob")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(Object::decode(&hash, b"nonsense").is_err());
    }

    #[test]
    fn decode_tree_with_trailing_bytes() {
        let mut tree = Tree::new();
        tree.insert("a", EntryKind::Blob, Hash::for_bytes(b"a")).unwrap();
        let mut encoded = tree.encode();
        // extend the payload and fix up the length header
        encoded.push(0);
        let (_, payload) = encoded.split_at(13);
        let reframed = crate::fs::codec::frame("tree", payload);
        match Object::decode(&Hash::for_bytes(b"x"), &reframed) {
            Err(Error::CorruptObject { reason, .. }) => assert!(reason.contains("trailing")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn serializes_for_display() {
        let obj = Object::blob(vec![104, 105]);
        assert_eq!(
            serde_json::to_value(&obj).unwrap(),
            serde_json::json!({"kind": "blob", "data": [104, 105]})
        );
    }
}

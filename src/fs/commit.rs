use super::codec::{Decoder, Encoder};
use super::identity::Identity;
use super::object::{unexpected, Object, COMMIT, TREE};
use crate::cas::{Hash, CAS};
use crate::error::*;
use serde::Serialize;

/// A Commit is one recorded point in history: a root tree, the commit it evolved from (absent
/// for the first commit), a message, and who authored and committed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub tree: Hash,
    pub parent: Option<Hash>,
    pub message: String,
    pub author: Identity,
    pub committer: Identity,
}

impl Commit {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.hash(&self.tree);
        match self.parent {
            None => {
                enc.u8(0);
            }
            Some(ref parent) => {
                enc.u8(1).hash(parent);
            }
        }
        enc.str(&self.message);
        self.author.encode(&mut enc);
        self.committer.encode(&mut enc);
        enc.finish(COMMIT)
    }

    pub(crate) fn decode(dec: &mut Decoder) -> Result<Commit, String> {
        let tree = dec.hash()?;
        let parent = match dec.u8()? {
            0 => None,
            1 => Some(dec.hash()?),
            other => return Err(format!("bad parent flag {}", other)),
        };
        Ok(Commit {
            tree,
            parent,
            message: dec.string()?,
            author: Identity::decode(dec)?,
            committer: Identity::decode(dec)?,
        })
    }

    /// Verify that this commit's tree and parent are already stored, with the right kinds.
    pub(crate) fn check_links<C: CAS + ?Sized>(&self, cas: &C) -> Result<()> {
        match Object::retrieve_from(cas, &self.tree) {
            Ok(Object::Tree(_)) => {}
            Ok(other) => return Err(unexpected(&self.tree, TREE, &other)),
            Err(Error::ObjectNotFound(_)) => return Err(Error::MissingTree(self.tree.clone())),
            Err(e) => return Err(e),
        }

        if let Some(ref parent) = self.parent {
            match Object::retrieve_from(cas, parent) {
                Ok(Object::Commit(_)) => {}
                Ok(other) => return Err(unexpected(parent, COMMIT, &other)),
                Err(Error::ObjectNotFound(_)) => return Err(Error::MissingParent(parent.clone())),
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Store this commit, returning its hash.  Fails if the tree or parent is not yet stored.
    pub fn store_in<C: CAS + ?Sized>(&self, cas: &mut C) -> Result<Hash> {
        self.check_links(cas)?;
        Ok(cas.store(self.encode()))
    }

    /// Get a commit from storage, given its hash.  Any failure to find a commit there, including
    /// finding some other kind of object, is reported as `CommitNotFound`.
    pub fn retrieve_from<C: CAS + ?Sized>(cas: &C, hash: &Hash) -> Result<Commit> {
        match Object::retrieve_from(cas, hash) {
            Ok(Object::Commit(commit)) => Ok(commit),
            Ok(_) | Err(Error::ObjectNotFound(_)) => Err(Error::CommitNotFound(hash.clone())),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cas::Storage;
    use crate::fs::Tree;

    fn identity() -> Identity {
        Identity::new("dev", "dev@example.com", 1585000000, 540)
    }

    fn commit(tree: Hash, parent: Option<Hash>, message: &str) -> Commit {
        Commit {
            tree,
            parent,
            message: message.to_string(),
            author: identity(),
            committer: identity(),
        }
    }

    #[test]
    fn test_root() {
        let mut storage = Storage::new();
        let tree = Tree::new().store_in(&mut storage);
        let root = commit(tree, None, "root");
        let hash = root.store_in(&mut storage).unwrap();
        assert_eq!(Commit::retrieve_from(&storage, &hash).unwrap(), root);
    }

    #[test]
    fn test_child() {
        let mut storage = Storage::new();
        let tree = Tree::new().store_in(&mut storage);
        let root = commit(tree.clone(), None, "root").store_in(&mut storage).unwrap();
        let child = commit(tree, Some(root.clone()), "child");
        let hash = child.store_in(&mut storage).unwrap();
        assert_ne!(hash, root);
        assert_eq!(Commit::retrieve_from(&storage, &hash).unwrap().parent, Some(root));
    }

    #[test]
    fn same_fields_same_hash() {
        let tree = Hash::for_bytes(b"tree");
        assert_eq!(
            Object::Commit(commit(tree.clone(), None, "m")).hash(),
            Object::Commit(commit(tree.clone(), None, "m")).hash()
        );
        assert_ne!(
            Object::Commit(commit(tree.clone(), None, "m")).hash(),
            Object::Commit(commit(tree, None, "n")).hash()
        );
    }

    #[test]
    fn missing_parent_refused() {
        let mut storage = Storage::new();
        let tree = Tree::new().store_in(&mut storage);
        let bogus = Hash::for_bytes(b"no such commit");
        let orphan = commit(tree, Some(bogus.clone()), "orphan");
        assert_eq!(orphan.store_in(&mut storage), Err(Error::MissingParent(bogus)));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn parent_must_be_commit() {
        let mut storage = Storage::new();
        let tree = Tree::new().store_in(&mut storage);
        let orphan = commit(tree.clone(), Some(tree.clone()), "orphan");
        assert_eq!(
            orphan.store_in(&mut storage),
            Err(Error::UnexpectedKind {
                hash: tree,
                expected: "commit",
                found: "tree"
            })
        );
    }

    #[test]
    fn missing_tree_refused() {
        let mut storage = Storage::new();
        let bogus = Hash::for_bytes(b"no such tree");
        assert_eq!(
            commit(bogus.clone(), None, "m").store_in(&mut storage),
            Err(Error::MissingTree(bogus))
        );
        assert!(storage.is_empty());
    }

    #[test]
    fn object_store_in_checks_links() {
        let mut storage = Storage::new();
        let bogus = Hash::for_bytes(b"no such tree");
        let obj = Object::Commit(commit(bogus.clone(), None, "m"));
        assert_eq!(obj.store_in(&mut storage), Err(Error::MissingTree(bogus)));
    }

    #[test]
    fn retrieve_non_commit() {
        let mut storage = Storage::new();
        let tree = Tree::new().store_in(&mut storage);
        assert_eq!(
            Commit::retrieve_from(&storage, &tree),
            Err(Error::CommitNotFound(tree))
        );
    }
}

use super::codec::{Decoder, Encoder};
use super::object::{unexpected, Object, TREE};
use crate::cas::{Hash, CAS};
use crate::error::*;
use crate::path::{is_valid_segment, RepoPath};
use serde::Serialize;
use std::collections::BTreeMap;

/// The kind of object a tree entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
}

impl EntryKind {
    fn to_byte(self) -> u8 {
        match self {
            EntryKind::Blob => 0,
            EntryKind::Tree => 1,
        }
    }

    fn from_byte(byte: u8) -> Result<EntryKind, String> {
        match byte {
            0 => Ok(EntryKind::Blob),
            1 => Ok(EntryKind::Tree),
            other => Err(format!("unknown entry kind {}", other)),
        }
    }
}

/// One named entry in a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub hash: Hash,
}

/// A Tree is a snapshot of one directory: a set of uniquely-named entries, each referring to a
/// blob or a subtree by hash.  Entries are kept sorted by name, so the encoding (and thus the
/// hash) depends only on the set of entries and never on the order they were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Create a new, empty tree
    pub fn new() -> Tree {
        Tree {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace the entry with the given name, returning the entry it replaced.
    pub fn insert<N: Into<String>>(&mut self, name: N, kind: EntryKind, hash: Hash) -> Result<Option<TreeEntry>> {
        let name = name.into();
        if !is_valid_segment(&name) {
            return Err(Error::InvalidPath(name));
        }
        Ok(self.entries.insert(name, TreeEntry { kind, hash }))
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    /// Iterate over entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.u32(self.entries.len() as u32);
        for (name, entry) in self.entries.iter() {
            enc.u8(entry.kind.to_byte()).str(name).hash(&entry.hash);
        }
        enc.finish(TREE)
    }

    pub(crate) fn decode(dec: &mut Decoder) -> Result<Tree, String> {
        let count = dec.u32()?;
        let mut entries = BTreeMap::new();
        let mut previous: Option<String> = None;
        for _ in 0..count {
            let kind = EntryKind::from_byte(dec.u8()?)?;
            let name = dec.string()?;
            let hash = dec.hash()?;
            if !is_valid_segment(&name) {
                return Err(format!("invalid entry name {:?}", name));
            }
            if let Some(ref prev) = previous {
                if prev >= &name {
                    return Err(format!("entries out of order or duplicated at {:?}", name));
                }
            }
            previous = Some(name.clone());
            entries.insert(name, TreeEntry { kind, hash });
        }
        Ok(Tree { entries })
    }

    /// Store this tree, returning its hash.
    pub fn store_in<C: CAS + ?Sized>(&self, cas: &mut C) -> Hash {
        cas.store(self.encode())
    }

    /// Retrieve a tree by hash.
    pub fn retrieve_from<C: CAS + ?Sized>(cas: &C, hash: &Hash) -> Result<Tree> {
        match Object::retrieve_from(cas, hash)? {
            Object::Tree(tree) => Ok(tree),
            other => Err(unexpected(hash, TREE, &other)),
        }
    }
}

/// Walk from the tree at `root` along `path`, returning the hash of the blob at its end.
///
/// Fails with `PathNotFound` if a segment is missing, and with `NotAFile` if a non-terminal
/// segment is a blob or the terminal segment is a tree.
pub fn resolve_blob<C: CAS + ?Sized>(cas: &C, root: &Hash, path: &RepoPath) -> Result<Hash> {
    let not_found = || Error::PathNotFound(path.to_string());
    let (file_name, dirs) = path.segments().split_last().ok_or_else(not_found)?;

    let mut tree = Tree::retrieve_from(cas, root)?;
    for dir in dirs {
        let entry = tree.get(dir).ok_or_else(not_found)?;
        match entry.kind {
            EntryKind::Tree => {
                let hash = entry.hash.clone();
                tree = Tree::retrieve_from(cas, &hash)?;
            }
            EntryKind::Blob => return Err(Error::NotAFile(path.to_string())),
        }
    }

    let entry = tree.get(file_name).ok_or_else(not_found)?;
    match entry.kind {
        EntryKind::Blob => Ok(entry.hash.clone()),
        EntryKind::Tree => Err(Error::NotAFile(path.to_string())),
    }
}

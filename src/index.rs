use crate::path::RepoPath;
use std::collections::BTreeMap;

/// The Index holds the changes staged for the next commit: a full content snapshot for each
/// staged path.  It is only ever emptied all at once, by a successful commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    entries: BTreeMap<RepoPath, Vec<u8>>,
}

impl Index {
    pub fn new() -> Index {
        Index {
            entries: BTreeMap::new(),
        }
    }

    /// Stage `data` for `path`, replacing anything staged there before.
    pub fn stage(&mut self, path: RepoPath, data: Vec<u8>) {
        self.entries.insert(path, data);
    }

    pub fn get(&self, path: &RepoPath) -> Option<&[u8]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Iterate over staged paths and content, in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&RepoPath, &[u8])> {
        self.entries.iter().map(|(p, d)| (p, d.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &RepoPath> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

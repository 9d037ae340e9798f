use super::snapshot::Snapshot;
use crate::error::*;
use crate::path::RepoPath;
use std::collections::BTreeMap;

/// A node in the working tree: either a directory of named children, or a file's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Directory(BTreeMap<String, Node>),
    File(Vec<u8>),
}

/// The WorkTree is the live, editable file state: a mutable hierarchy of directories and files,
/// not content-addressed and not shared with history.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkTree {
    root: BTreeMap<String, Node>,
}

impl Default for WorkTree {
    fn default() -> Self {
        WorkTree::new()
    }
}

impl WorkTree {
    /// Create a new, empty working tree
    pub fn new() -> WorkTree {
        WorkTree {
            root: BTreeMap::new(),
        }
    }

    /// Create or overwrite the file at `path`, creating any missing directories along the way.
    ///
    /// Fails with `NotADirectory` if a file sits where a directory is needed, and with
    /// `NotAFile` if `path` itself names a directory.  Nothing is modified on failure.
    pub fn write(&mut self, path: &RepoPath, data: Vec<u8>) -> Result<()> {
        let (file_name, dirs) = match path.segments().split_last() {
            Some(split) => split,
            None => return Err(Error::InvalidPath(path.to_string())),
        };

        // check the whole path before creating anything, so a failed write changes nothing
        self.check_writable(path)?;

        let mut dir = &mut self.root;
        for name in dirs {
            let node = dir
                .entry(name.clone())
                .or_insert_with(|| Node::Directory(BTreeMap::new()));
            dir = match node {
                Node::Directory(children) => children,
                // ruled out by check_writable
                Node::File(_) => return Err(Error::NotADirectory(path.to_string())),
            };
        }
        dir.insert(file_name.clone(), Node::File(data));
        Ok(())
    }

    fn check_writable(&self, path: &RepoPath) -> Result<()> {
        let segments = path.segments();
        let mut dir = &self.root;
        for (i, name) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            match dir.get(name) {
                None => return Ok(()),
                Some(Node::Directory(_)) if last => return Err(Error::NotAFile(path.to_string())),
                Some(Node::Directory(children)) => dir = children,
                Some(Node::File(_)) if last => return Ok(()),
                Some(Node::File(_)) => return Err(Error::NotADirectory(path.prefix(i + 1))),
            }
        }
        Ok(())
    }

    /// Read the content of the file at `path`.  Fails with `PathNotFound` if any segment is
    /// missing, or if the path leads to a directory or through a file.
    pub fn read(&self, path: &RepoPath) -> Result<&[u8]> {
        let not_found = || Error::PathNotFound(path.to_string());
        let (file_name, dirs) = path.segments().split_last().ok_or_else(not_found)?;

        let mut dir = &self.root;
        for name in dirs {
            match dir.get(name) {
                Some(Node::Directory(children)) => dir = children,
                _ => return Err(not_found()),
            }
        }

        match dir.get(file_name) {
            Some(Node::File(data)) => Ok(data.as_slice()),
            _ => Err(not_found()),
        }
    }

    /// Render the whole tree as a nested name-to-entry view, for display.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of_directory(&self.root)
    }
}

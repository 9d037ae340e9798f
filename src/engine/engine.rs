use super::clock::{Clock, SystemClock};
use super::config::EngineConfig;
use crate::cas::{Hash, Storage, Transaction};
use crate::error::*;
use crate::fs::{build_tree, resolve_blob, retrieve_blob, Commit, History, Identity, Object};
use crate::index::Index;
use crate::path::RepoPath;
use crate::worktree::{Snapshot, WorkTree};
use log::{debug, info};
use serde::Serialize;

/// One entry in the commit log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub hash: Hash,
    pub commit: Commit,
}

/// An Engine bundles one repository's state: the object store, the working tree, the staging
/// index, and HEAD.  Every operation runs to completion and either succeeds or leaves the engine
/// exactly as it was.  Engines share nothing, so any number can be used side by side; a host
/// driving one from several threads must serialize access to it.
pub struct Engine {
    storage: Storage,
    worktree: WorkTree,
    index: Index,
    head: Option<Hash>,
    config: EngineConfig,
    clock: Box<dyn Clock + Send + Sync>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

/// Parse a path that must name an existing file; a malformed path can never do so.
fn file_path(path: &str) -> Result<RepoPath> {
    RepoPath::parse(path).map_err(|_| Error::PathNotFound(path.to_string()))
}

impl Engine {
    /// Create a fresh engine: empty store, empty working tree, no HEAD.
    pub fn new() -> Engine {
        Engine::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Engine {
        Engine::with_clock(config, SystemClock)
    }

    pub fn with_clock<C: Clock + Send + Sync + 'static>(config: EngineConfig, clock: C) -> Engine {
        Engine {
            storage: Storage::new(),
            worktree: WorkTree::new(),
            index: Index::new(),
            head: None,
            config,
            clock: Box::new(clock),
        }
    }

    /// Create or overwrite a file in the working tree.
    pub fn write(&mut self, path: &str, data: Vec<u8>) -> Result<()> {
        let path = RepoPath::parse(path)?;
        self.worktree.write(&path, data)
    }

    /// Read a file from the working tree.
    pub fn read(&self, path: &str) -> Result<&[u8]> {
        self.worktree.read(&file_path(path)?)
    }

    /// Stage the current content of a working-tree file for the next commit.
    pub fn add(&mut self, path: &str) -> Result<()> {
        let path = file_path(path)?;
        let data = self.worktree.read(&path)?.to_vec();
        debug!("staging {} ({} bytes)", path, data.len());
        self.index.stage(path, data);
        Ok(())
    }

    /// The identity for a commit made now, from the configuration and the clock.
    pub fn identity(&self) -> Identity {
        Identity::new(
            self.config.name.clone(),
            self.config.email.clone(),
            self.clock.now(),
            self.config.timezone_offset_minutes,
        )
    }

    /// Commit everything staged, with both author and committer taken from `identity()`.
    /// Returns the new commit's hash.
    pub fn commit(&mut self, message: &str) -> Result<Hash> {
        let who = self.identity();
        self.commit_as(message, who.clone(), who)
    }

    /// Commit everything staged, recording the given author and committer.
    ///
    /// The new root tree is the parent commit's tree (or an empty tree) with each staged file
    /// applied.  On success the index is cleared and HEAD moves to the new commit; on failure
    /// nothing changes.
    pub fn commit_as(&mut self, message: &str, author: Identity, committer: Identity) -> Result<Hash> {
        if message.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        if self.index.is_empty() {
            return Err(Error::NothingToCommit);
        }

        // write every new object through a transaction, publishing them only once the commit
        // object itself has been stored
        let (hash, pending) = {
            let mut txn = Transaction::new(&self.storage);
            let base = match self.head {
                Some(ref head) => Some(Commit::retrieve_from(&txn, head)?.tree),
                None => None,
            };
            let changes: Vec<(&RepoPath, &[u8])> = self.index.iter().collect();
            let tree = build_tree(&mut txn, base.as_ref(), &changes)?;

            let commit = Commit {
                tree,
                parent: self.head.clone(),
                message: message.to_string(),
                author,
                committer,
            };
            let hash = commit.store_in(&mut txn)?;
            debug!("commit {} writes {} new objects", hash, txn.pending_len());
            (hash, txn.into_pending())
        };

        self.storage.absorb(pending);
        info!("committed {} ({} files) on {:?}", hash, self.index.len(), self.head);
        self.index.clear();
        self.head = Some(hash.clone());
        Ok(hash)
    }

    /// The commit history from HEAD back to the first commit, most recent first.  An engine
    /// with no commits yields an empty log.
    ///
    /// This only fails if the object store is corrupt, i.e. a commit on the chain is missing or
    /// does not decode, which no sequence of engine operations can produce.
    pub fn log(&self) -> Result<Vec<LogEntry>> {
        History::new(&self.storage, self.head.as_ref())
            .map(|item| item.map(|(hash, commit)| LogEntry { hash, commit }))
            .collect()
    }

    /// Write the version of `path` recorded in `commit` into the working tree.  HEAD, the
    /// index, and every other working-tree file are left alone, and no objects are created.
    pub fn restore(&mut self, commit: &Hash, path: &str) -> Result<()> {
        let found = Commit::retrieve_from(&self.storage, commit)?;
        let path = file_path(path)?;
        let blob = resolve_blob(&self.storage, &found.tree, &path)?;
        let data = retrieve_blob(&self.storage, &blob)?;
        self.worktree.write(&path, data)?;
        debug!("restored {} from {}", path, commit);
        Ok(())
    }

    /// A display view of the working tree.
    pub fn snapshot(&self) -> Snapshot {
        self.worktree.snapshot()
    }

    /// The most recent commit, if there has been one.
    pub fn head(&self) -> Option<&Hash> {
        self.head.as_ref()
    }

    /// Look up any stored object by hash.
    pub fn object(&self, hash: &Hash) -> Result<Object> {
        Object::retrieve_from(&self.storage, hash)
    }

    /// Look up a commit by hash.
    pub fn commit_object(&self, hash: &Hash) -> Result<Commit> {
        Commit::retrieve_from(&self.storage, hash)
    }

    /// Paths staged for the next commit, in order.
    pub fn staged(&self) -> impl Iterator<Item = &RepoPath> {
        self.index.paths()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

#[cfg(test)]
mod test {
    use super::super::clock::FixedClock;
    use super::*;
    use crate::fs::Tree;
    use crate::util::test::init_env_logger;

    fn engine() -> Engine {
        init_env_logger();
        Engine::with_clock(
            EngineConfig {
                name: "dev".to_string(),
                email: "dev@example.com".to_string(),
                timezone_offset_minutes: 540,
            },
            FixedClock(1585000000),
        )
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn engine_is_send() {
        assert_send::<Engine>();
    }

    #[test]
    fn shared_behind_a_mutex() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let shared = Arc::new(Mutex::new(engine()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let mut engine = shared.lock().unwrap();
                    let name = format!("file{}", i);
                    engine.write(&name, vec![i as u8]).unwrap();
                    engine.add(&name).unwrap();
                    engine.commit(&format!("commit {}", i)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.lock().unwrap().log().unwrap().len(), 4);
    }

    #[test]
    fn commit_records_identity() {
        let mut engine = engine();
        engine.write("a.txt", b"hello".to_vec()).unwrap();
        engine.add("a.txt").unwrap();
        let hash = engine.commit("first").unwrap();

        let commit = engine.commit_object(&hash).unwrap();
        assert_eq!(commit.author, commit.committer);
        assert_eq!(commit.author.to_string(), "dev <dev@example.com> 1585000000 +0900");
        assert_eq!(commit.parent, None);
        assert_eq!(engine.head(), Some(&hash));
    }

    #[test]
    fn commit_as_distinguishes_authorship() {
        let mut engine = engine();
        engine.write("a.txt", b"hello".to_vec()).unwrap();
        engine.add("a.txt").unwrap();
        let author = Identity::new("alice", "alice@example.com", 100, 0);
        let committer = Identity::new("bob", "bob@example.com", 200, -60);
        let hash = engine.commit_as("patch", author.clone(), committer.clone()).unwrap();

        let commit = engine.commit_object(&hash).unwrap();
        assert_eq!(commit.author, author);
        assert_eq!(commit.committer, committer);
    }

    #[test]
    fn commit_is_deterministic() {
        let mut one = engine();
        let mut two = engine();
        for e in [&mut one, &mut two].iter_mut() {
            e.write("x/y", b"same".to_vec()).unwrap();
            e.add("x/y").unwrap();
        }
        assert_eq!(one.commit("m").unwrap(), two.commit("m").unwrap());
    }

    #[test]
    fn whitespace_message() {
        let mut engine = engine();
        engine.write("a", b"1".to_vec()).unwrap();
        engine.add("a").unwrap();
        assert_eq!(engine.commit(" \t\n"), Err(Error::EmptyMessage));
        assert_eq!(engine.index().len(), 1);
    }

    #[test]
    fn nothing_to_commit() {
        let mut engine = engine();
        assert_eq!(engine.commit("empty"), Err(Error::NothingToCommit));
        assert!(engine.storage().is_empty());
        assert_eq!(engine.head(), None);
    }

    #[test]
    fn commit_clears_whole_index() {
        let mut engine = engine();
        engine.write("a", b"1".to_vec()).unwrap();
        engine.write("b/c", b"2".to_vec()).unwrap();
        engine.add("a").unwrap();
        engine.add("b/c").unwrap();
        engine.commit("both").unwrap();
        assert!(engine.index().is_empty());
        assert_eq!(engine.staged().count(), 0);
    }

    #[test]
    fn second_commit_builds_on_first() {
        let mut engine = engine();
        engine.write("a", b"1".to_vec()).unwrap();
        engine.add("a").unwrap();
        let first = engine.commit("first").unwrap();

        engine.write("b", b"2".to_vec()).unwrap();
        engine.add("b").unwrap();
        let second = engine.commit("second").unwrap();

        let commit = engine.commit_object(&second).unwrap();
        assert_eq!(commit.parent, Some(first));
        let tree = Tree::retrieve_from(engine.storage(), &commit.tree).unwrap();
        // "a" is carried over from the first commit
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn add_reads_current_content() {
        let mut engine = engine();
        engine.write("a", b"old".to_vec()).unwrap();
        engine.add("a").unwrap();
        engine.write("a", b"new".to_vec()).unwrap();
        assert_eq!(engine.index().get(&RepoPath::parse("a").unwrap()), Some(&b"old"[..]));
        engine.add("a").unwrap();
        assert_eq!(engine.index().get(&RepoPath::parse("a").unwrap()), Some(&b"new"[..]));
    }

    #[test]
    fn add_invalid_path() {
        let mut engine = engine();
        assert_eq!(engine.add("../x"), Err(Error::PathNotFound("../x".to_string())));
        assert_eq!(engine.read("/abs"), Err(Error::PathNotFound("/abs".to_string())));
    }

    #[test]
    fn write_invalid_path() {
        let mut engine = engine();
        assert_eq!(
            engine.write("a/../b", b"x".to_vec()),
            Err(Error::InvalidPath("a/../b".to_string()))
        );
    }

    #[test]
    fn restore_creates_no_objects() {
        let mut engine = engine();
        engine.write("a", b"1".to_vec()).unwrap();
        engine.add("a").unwrap();
        let first = engine.commit("first").unwrap();
        let objects = engine.storage().len();

        engine.write("a", b"2".to_vec()).unwrap();
        engine.restore(&first, "a").unwrap();
        assert_eq!(engine.storage().len(), objects);
        assert_eq!(engine.read("a").unwrap(), b"1");
    }

    #[test]
    fn restore_non_commit() {
        let mut engine = engine();
        engine.write("a", b"1".to_vec()).unwrap();
        engine.add("a").unwrap();
        let first = engine.commit("first").unwrap();
        let tree = engine.commit_object(&first).unwrap().tree;
        assert_eq!(engine.restore(&tree, "a"), Err(Error::CommitNotFound(tree)));
    }

    #[test]
    fn object_lookup() {
        let mut engine = engine();
        engine.write("a", b"1".to_vec()).unwrap();
        engine.add("a").unwrap();
        let first = engine.commit("first").unwrap();

        match engine.object(&first).unwrap() {
            Object::Commit(commit) => assert_eq!(commit.message, "first"),
            other => panic!("unexpected {:?}", other),
        }
        let missing = Hash::for_bytes(b"missing");
        assert_eq!(engine.object(&missing), Err(Error::ObjectNotFound(missing)));
    }
}

//! A Git-like object model, based on `cas`: blobs holding file content, trees holding
//! directory snapshots, and commits linking a root tree to its parent commit.  Objects refer
//! to one another only by hash, so the content-addressed storage itself is the arena for the
//! whole history.
//!
//! # Examples
//!
//! ```
//! use twig::cas::Storage;
//! use twig::fs::{build_tree, resolve_blob, retrieve_blob};
//! use twig::path::RepoPath;
//!
//! let mut storage = Storage::new();
//! let path = RepoPath::parse("docs/readme").unwrap();
//! let root = build_tree(&mut storage, None, &[(&path, &b"hi"[..])]).unwrap();
//! let blob = resolve_blob(&storage, &root, &path).unwrap();
//! assert_eq!(retrieve_blob(&storage, &blob).unwrap(), b"hi".to_vec());
//! ```

mod builder;
mod codec;
mod commit;
mod history;
mod identity;
mod object;
mod tree;

pub use self::builder::build_tree;
pub use self::commit::Commit;
pub use self::history::History;
pub use self::identity::Identity;
pub use self::object::{retrieve_blob, Object};
pub use self::tree::{resolve_blob, EntryKind, Tree, TreeEntry};

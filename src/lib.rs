//! Twig is a minimal, embeddable version-control engine: a content-addressed object store,
//! a mutable working tree, a staging index, and a linear commit history.
//!
//! A host drives it through the `Engine` command surface:
//!
//! ```
//! use twig::Engine;
//!
//! let mut engine = Engine::new();
//! engine.write("a.txt", b"hello".to_vec()).unwrap();
//! engine.add("a.txt").unwrap();
//! let first = engine.commit("first").unwrap();
//!
//! engine.write("a.txt", b"world".to_vec()).unwrap();
//! engine.restore(&first, "a.txt").unwrap();
//! assert_eq!(engine.read("a.txt").unwrap(), b"hello".to_vec());
//! ```

pub mod cas;
pub mod engine;
pub mod fs;
pub mod index;
pub mod path;
pub mod worktree;

mod error;
pub use crate::error::*;

pub use crate::cas::Hash;
pub use crate::engine::{Clock, Engine, EngineConfig, FixedClock, LogEntry, SystemClock};
pub use crate::fs::{Commit, Identity, Object};
pub use crate::worktree::Snapshot;

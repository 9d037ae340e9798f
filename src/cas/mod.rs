//! `cas` -- an in-memory, content-addressible storage system.  Content is stored as encoded
//! bytes, keyed by the SHA-256 hash of those bytes.  Storage is append-only and deduplicating:
//! storing the same bytes twice yields the same hash and keeps one copy.
//!
//! The API is in the `CAS` trait.  Writes that must become visible all at once go through a
//! `Transaction`, which is published into the `Storage` only when the caller is done.
//!
//! # Examples
//!
//! ```
//! use twig::cas::{Storage, CAS};
//!
//! let mut storage = Storage::new();
//! let hash = storage.store(b"hello".to_vec());
//! assert_eq!(storage.retrieve(&hash), Some(&b"hello"[..]));
//! assert_eq!(storage.store(b"hello".to_vec()), hash);
//! assert_eq!(storage.len(), 1);
//! ```

mod content;
mod hash;
mod storage;
mod traits;
mod transaction;

pub use self::hash::{Hash, HASH_LEN};
pub use self::storage::Storage;
pub use self::traits::CAS;
pub use self::transaction::Transaction;

//! The working tree: the host's live, mutable file state, and a display snapshot of it.

mod snapshot;
mod worktree;

pub use self::snapshot::Snapshot;
pub use self::worktree::{Node, WorkTree};

use super::commit::Commit;
use crate::cas::{Hash, CAS};
use crate::error::*;

/// History walks a commit chain from a starting commit back to the root, following each
/// commit's parent link.  Commits can only be stored once their parent exists, so the chain is
/// finite and the walk always terminates.
pub struct History<'a, C: CAS + ?Sized> {
    cas: &'a C,
    next: Option<Hash>,
}

impl<'a, C: CAS + ?Sized> History<'a, C> {
    /// Walk from `start`, or yield nothing at all if there is no starting commit.
    pub fn new(cas: &'a C, start: Option<&Hash>) -> History<'a, C> {
        History {
            cas,
            next: start.cloned(),
        }
    }
}

impl<'a, C: CAS + ?Sized> Iterator for History<'a, C> {
    type Item = Result<(Hash, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let hash = self.next.take()?;
        match Commit::retrieve_from(self.cas, &hash) {
            Ok(commit) => {
                self.next = commit.parent.clone();
                Some(Ok((hash, commit)))
            }
            // the walk ends at the first error
            Err(e) => Some(Err(e)),
        }
    }
}

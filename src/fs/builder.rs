use super::object::Object;
use super::tree::{EntryKind, Tree};
use crate::cas::{Hash, CAS};
use crate::error::*;
use crate::path::RepoPath;
use log::trace;
use std::collections::BTreeMap;

/// Build a new root tree by applying `changes` on top of the tree at `base` (or an empty tree).
///
/// Each change stores a blob for its content, then every tree along its path is rebuilt bottom
/// up.  Entries untouched by any change are carried over by hash, so unchanged subtrees are
/// shared with the base rather than copied.  Each modified tree is rebuilt and stored once, no
/// matter how many changes fall beneath it.
pub fn build_tree<C: CAS + ?Sized>(
    cas: &mut C,
    base: Option<&Hash>,
    changes: &[(&RepoPath, &[u8])],
) -> Result<Hash> {
    apply(cas, base, changes, 0)
}

fn apply<C: CAS + ?Sized>(
    cas: &mut C,
    base: Option<&Hash>,
    changes: &[(&RepoPath, &[u8])],
    depth: usize,
) -> Result<Hash> {
    let mut tree = match base {
        Some(hash) => Tree::retrieve_from(cas, hash)?,
        None => Tree::new(),
    };

    // group changes by their name at this level
    let mut groups: BTreeMap<&str, Vec<(&RepoPath, &[u8])>> = BTreeMap::new();
    for &(path, content) in changes {
        groups
            .entry(path.segments()[depth].as_str())
            .or_insert_with(Vec::new)
            .push((path, content));
    }

    for (name, group) in groups {
        let (leaves, deeper): (Vec<_>, Vec<_>) = group
            .into_iter()
            .partition(|(path, _)| path.segments().len() == depth + 1);
        let existing = tree.get(name).cloned();

        if let Some(&(path, content)) = leaves.last() {
            if !deeper.is_empty() {
                return Err(Error::NotADirectory(path.to_string()));
            }
            if let Some(ref entry) = existing {
                if entry.kind == EntryKind::Tree {
                    return Err(Error::NotAFile(path.to_string()));
                }
            }
            let blob = Object::blob(content.to_vec()).store_in(cas)?;
            tree.insert(name, EntryKind::Blob, blob)?;
        } else {
            let sub_base = match existing {
                None => None,
                Some(ref entry) if entry.kind == EntryKind::Tree => Some(&entry.hash),
                Some(_) => {
                    let path = deeper[0].0;
                    return Err(Error::NotADirectory(path.prefix(depth + 1)));
                }
            };
            let subtree = apply(cas, sub_base, &deeper, depth + 1)?;
            tree.insert(name, EntryKind::Tree, subtree)?;
        }
    }

    let hash = tree.store_in(cas);
    trace!("rebuilt tree {} at depth {} ({} entries)", hash, depth, tree.len());
    Ok(hash)
}

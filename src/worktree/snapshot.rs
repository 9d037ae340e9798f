use super::worktree::Node;
use serde::Serialize;
use std::collections::BTreeMap;

/// A Snapshot is a display view of the working tree: a nested mapping from names to entries,
/// each tagged as a directory or a file.  It serializes to JSON as, for example,
/// `{"kind": "directory", "children": {"a.txt": {"kind": "file", "content": "hello"}}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Snapshot {
    Directory { children: BTreeMap<String, Snapshot> },
    File { content: String },
}

impl Snapshot {
    pub(crate) fn of_directory(children: &BTreeMap<String, Node>) -> Snapshot {
        Snapshot::Directory {
            children: children
                .iter()
                .map(|(name, node)| (name.clone(), Snapshot::of_node(node)))
                .collect(),
        }
    }

    fn of_node(node: &Node) -> Snapshot {
        match node {
            Node::Directory(children) => Snapshot::of_directory(children),
            // file content is shown as text; bytes that are not valid UTF-8 are replaced
            Node::File(data) => Snapshot::File {
                content: String::from_utf8_lossy(data).into_owned(),
            },
        }
    }
}

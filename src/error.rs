use crate::cas::Hash;
use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    #[fail(display = "invalid path: {:?}", _0)]
    InvalidPath(String),

    #[fail(display = "path not found: {}", _0)]
    PathNotFound(String),

    #[fail(display = "not a file: {}", _0)]
    NotAFile(String),

    #[fail(display = "not a directory: {}", _0)]
    NotADirectory(String),

    #[fail(display = "object not found: {}", _0)]
    ObjectNotFound(Hash),

    #[fail(display = "commit not found: {}", _0)]
    CommitNotFound(Hash),

    #[fail(display = "commit message is empty")]
    EmptyMessage,

    #[fail(display = "nothing to commit")]
    NothingToCommit,

    #[fail(display = "invalid hash: {:?}", _0)]
    InvalidHash(String),

    #[fail(display = "object {} is a {}, expected a {}", hash, found, expected)]
    UnexpectedKind {
        hash: Hash,
        expected: &'static str,
        found: &'static str,
    },

    #[fail(display = "corrupt object {}: {}", hash, reason)]
    CorruptObject { hash: Hash, reason: String },

    #[fail(display = "parent commit {} does not exist", _0)]
    MissingParent(Hash),

    #[fail(display = "tree {} does not exist", _0)]
    MissingTree(Hash),

    #[fail(display = "configuration error: {}", _0)]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

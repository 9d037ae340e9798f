use crate::error::*;
use std::fmt;
use std::str::FromStr;

/// A RepoPath is a validated, `/`-delimited relative path: one or more non-empty segments, none
/// of which is `.` or `..`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoPath {
    segments: Vec<String>,
}

impl RepoPath {
    /// Parse a path, failing with `InvalidPath` if it is empty, absolute, has empty segments,
    /// or contains `.` or `..` segments.
    pub fn parse(path: &str) -> Result<RepoPath> {
        let invalid = || Error::InvalidPath(path.to_string());

        if path.is_empty() {
            return Err(invalid());
        }

        let mut segments = vec![];
        for segment in path.split('/') {
            if !is_valid_segment(segment) {
                return Err(invalid());
            }
            segments.push(segment.to_string());
        }

        Ok(RepoPath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment of the path.
    pub fn file_name(&self) -> &str {
        // a parsed path always has at least one segment
        &self.segments[self.segments.len() - 1]
    }

    /// The path made of the first `len` segments, for error messages.
    pub(crate) fn prefix(&self, len: usize) -> String {
        self.segments[..len].join("/")
    }
}

/// Is this a valid single path segment (and thus a valid tree entry name)?
pub(crate) fn is_valid_segment(segment: &str) -> bool {
    !(segment.is_empty() || segment == "." || segment == ".." || segment.contains('/') || segment.contains('\0'))
}

impl FromStr for RepoPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<RepoPath> {
        RepoPath::parse(s)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl fmt::Debug for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.to_string())
    }
}

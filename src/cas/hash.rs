use crate::error::*;
use crypto::digest::Digest;
use crypto::sha2::Sha256;
use rustc_serialize::hex::{FromHex, ToHex};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of a hash, in bytes.
pub const HASH_LEN: usize = 32;

/// Type Hash represents the key under which content is stored: the SHA-256 digest of that
/// content's encoding.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Hash(Vec<u8>);

impl Hash {
    /// Create a new hash, given a hex representation.
    pub fn from_hex(hex: &str) -> Result<Hash> {
        match hex.from_hex() {
            Ok(bytes) if bytes.len() == HASH_LEN => Ok(Hash(bytes)),
            _ => Err(Error::InvalidHash(hex.to_string())),
        }
    }

    /// Create a hash from raw digest bytes, as found in an encoded tree or commit.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Option<Hash> {
        if bytes.len() == HASH_LEN {
            Some(Hash(bytes.to_vec()))
        } else {
            None
        }
    }

    /// Create a new hash for the given content
    pub fn for_bytes(bytes: &[u8]) -> Hash {
        let mut sha = Sha256::new();
        sha.input(bytes);
        let mut hash = Hash(vec![0; sha.output_bytes()]);
        sha.result(&mut hash.0);
        hash
    }

    /// Get the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the hex representation of this hash.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Hash> {
        Hash::from_hex(s)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

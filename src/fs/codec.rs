//! The canonical byte encoding of stored objects.
//!
//! Every object is encoded as `<kind> <payload-length><payload>`: an ASCII kind tag, a space,
//! the payload length as a big-endian u64, then the payload itself.  Variable-length fields
//! within a payload are prefixed with their length as a big-endian u32.  The whole encoding,
//! tag included, is what gets hashed, so objects of different kinds never share a hash.

use crate::cas::Hash;
use byteorder::{ByteOrder, NetworkEndian};

/// Builds an encoded payload.
pub(crate) struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder { buf: vec![] }
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        let mut bytes = [0u8; 4];
        NetworkEndian::write_u32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
        self
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        let mut bytes = [0u8; 4];
        NetworkEndian::write_i32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
        self
    }

    pub fn i64(&mut self, value: i64) -> &mut Self {
        let mut bytes = [0u8; 8];
        NetworkEndian::write_i64(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
        self
    }

    /// Append a u32-length-prefixed byte string.
    pub fn bytes(&mut self, value: &[u8]) -> &mut Self {
        self.u32(value.len() as u32);
        self.buf.extend_from_slice(value);
        self
    }

    pub fn str(&mut self, value: &str) -> &mut Self {
        self.bytes(value.as_bytes())
    }

    pub fn hash(&mut self, value: &Hash) -> &mut Self {
        self.bytes(value.as_bytes())
    }

    /// Wrap the payload built so far with the kind tag and length header.
    pub fn finish(&self, kind: &str) -> Vec<u8> {
        frame(kind, &self.buf)
    }
}

/// Wrap a payload with its kind tag and length header.
pub(crate) fn frame(kind: &str, payload: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(kind.len() + 9 + payload.len());
    encoded.extend_from_slice(kind.as_bytes());
    encoded.push(b' ');
    let mut len = [0u8; 8];
    NetworkEndian::write_u64(&mut len, payload.len() as u64);
    encoded.extend_from_slice(&len);
    encoded.extend_from_slice(payload);
    encoded
}

/// Split an encoded object into its kind tag and payload, checking the length header.
pub(crate) fn unframe(encoded: &[u8]) -> Result<(&str, &[u8]), String> {
    let space = encoded
        .iter()
        .position(|b| *b == b' ')
        .ok_or_else(|| "missing kind tag".to_string())?;
    let kind = std::str::from_utf8(&encoded[..space]).map_err(|_| "kind tag is not UTF-8".to_string())?;
    let rest = &encoded[space + 1..];
    if rest.len() < 8 {
        return Err("truncated length header".to_string());
    }
    let len = NetworkEndian::read_u64(&rest[..8]);
    let payload = &rest[8..];
    if payload.len() as u64 != len {
        return Err(format!("payload length {} does not match header {}", payload.len(), len));
    }
    Ok((kind, payload))
}

/// Reads fields back out of a payload, in the order the Encoder wrote them.
pub(crate) struct Decoder<'a> {
    buf: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Decoder<'a> {
        Decoder { buf }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], String> {
        if self.buf.len() < len {
            return Err(format!("wanted {} bytes, only {} remain", len, self.buf.len()));
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub fn u8(&mut self) -> Result<u8, String> {
        Ok(self.take(1)?[0])
    }

    pub fn u32(&mut self) -> Result<u32, String> {
        Ok(NetworkEndian::read_u32(self.take(4)?))
    }

    pub fn i32(&mut self) -> Result<i32, String> {
        Ok(NetworkEndian::read_i32(self.take(4)?))
    }

    pub fn i64(&mut self) -> Result<i64, String> {
        Ok(NetworkEndian::read_i64(self.take(8)?))
    }

    pub fn bytes(&mut self) -> Result<&'a [u8], String> {
        let len = self.u32()? as usize;
        self.take(len)
    }

    pub fn string(&mut self) -> Result<String, String> {
        let bytes = self.bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| "string is not UTF-8".to_string())
    }

    pub fn hash(&mut self) -> Result<Hash, String> {
        let bytes = self.bytes()?;
        Hash::from_bytes(bytes).ok_or_else(|| format!("hash has length {}", bytes.len()))
    }

    /// Ensure the whole payload was consumed.
    pub fn finish(&self) -> Result<(), String> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(format!("{} trailing bytes", self.buf.len()))
        }
    }
}

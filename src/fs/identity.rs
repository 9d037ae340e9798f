use super::codec::{Decoder, Encoder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An Identity records who made a change, and when.  The time is kept as an absolute instant
/// (seconds since the Unix epoch) plus the author's UTC offset in minutes, so any display format
/// is a projection of these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub timestamp: i64,
    pub timezone_offset: i32,
}

impl Identity {
    pub fn new<N: Into<String>, E: Into<String>>(
        name: N,
        email: E,
        timestamp: i64,
        timezone_offset: i32,
    ) -> Identity {
        Identity {
            name: name.into(),
            email: email.into(),
            timestamp,
            timezone_offset,
        }
    }

    pub(crate) fn encode(&self, enc: &mut Encoder) {
        enc.str(&self.name)
            .str(&self.email)
            .i64(self.timestamp)
            .i32(self.timezone_offset);
    }

    pub(crate) fn decode(dec: &mut Decoder) -> Result<Identity, String> {
        Ok(Identity {
            name: dec.string()?,
            email: dec.string()?,
            timestamp: dec.i64()?,
            timezone_offset: dec.i32()?,
        })
    }
}

/// Formats as `name <email> seconds +HHMM`.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.timezone_offset < 0 { '-' } else { '+' };
        let offset = self.timezone_offset.unsigned_abs();
        write!(
            f,
            "{} <{}> {} {}{:02}{:02}",
            self.name,
            self.email,
            self.timestamp,
            sign,
            offset / 60,
            offset % 60
        )
    }
}

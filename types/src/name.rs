//! Interned 64-bit account and proposal names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbol table for the base32 name codec. Index = 5-bit symbol value.
const NAME_CHARSET: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum textual length of a name.
const MAX_NAME_LEN: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name is longer than 12 characters")]
    TooLong,

    #[error("invalid character {0:?} in name (allowed: a-z, 1-5, '.')")]
    InvalidChar(char),
}

/// An interned account or proposal name.
///
/// At most 12 characters drawn from `a-z`, `1-5` and `.`, packed five bits
/// per character into a `u64` from the most-significant end. The zero value
/// decodes to the empty string and stands for "absent". Equality and `Ord`
/// are on the raw integer, which is what the vote-key packing relies on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Name(u64);

impl Name {
    /// The absent name (all zero bits).
    pub const ZERO: Self = Self(0);

    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a name from its textual form.
    pub fn new(s: &str) -> Result<Self, NameError> {
        s.parse()
    }

    fn symbol(c: char) -> Result<u64, NameError> {
        match c {
            '.' => Ok(0),
            '1'..='5' => Ok(c as u64 - '1' as u64 + 1),
            'a'..='z' => Ok(c as u64 - 'a' as u64 + 6),
            _ => Err(NameError::InvalidChar(c)),
        }
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_NAME_LEN {
            return Err(NameError::TooLong);
        }
        let mut value: u64 = 0;
        for (i, c) in s.chars().enumerate() {
            value |= Self::symbol(c)? << (64 - 5 * (i + 1));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        // The low 4 bits are an unused 13th slot; skip them.
        let mut tmp = self.0 >> 4;
        for slot in out.iter_mut().rev() {
            *slot = NAME_CHARSET[(tmp & 0x1f) as usize];
            tmp >>= 5;
        }
        let end = out.iter().rposition(|&b| b != b'.').map_or(0, |p| p + 1);
        f.write_str(std::str::from_utf8(&out[..end]).unwrap_or(""))
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}

//! Term formats stored in the inverted index.
//!
//! The index keeps every value as an opaque byte string. Value types are told
//! apart by the field the term lives in, so the encodings here only need to be
//! unambiguous within a single type.

use serde::{Serialize, Serializer};
use std::fmt;

pub mod number;

/// An opaque index term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(Vec<u8>);

impl Token {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Token(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        self.0
            .iter()
            .fold(String::new(), |acc, byte| acc + &format!("{byte:02x}"))
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.as_bytes().to_vec())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Sentinel term for boolean `true`.
pub fn true_token() -> Token {
    Token(vec![0xFF])
}

/// Sentinel term for boolean `false`.
pub fn false_token() -> Token {
    Token(vec![0x00])
}

pub fn bool_token(value: bool) -> Token {
    if value { true_token() } else { false_token() }
}

/// Sentinel term for `null`.
pub fn null_token() -> Token {
    Token(Vec::new())
}

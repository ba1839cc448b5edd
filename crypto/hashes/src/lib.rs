//!
//! Hash primitives shared by the transaction signing stack: the 32-byte [`Hash`]
//! value type, keyed BLAKE2b domain hashers, the ECDSA signing-hash domain and
//! Bitcoin-style variable-length integer framing.
//!

mod hashers;
mod varint;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::{self, FromStr};

pub use hashers::*;
pub use varint::{decode_varint, encode_varint, varint_len, VarIntError};

pub const HASH_SIZE: usize = 32;

#[derive(PartialEq, Eq, Clone, Copy, Hash, Default, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct Hash([u8; HASH_SIZE]);

pub const ZERO_HASH: Hash = Hash([0; HASH_SIZE]);

impl Hash {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    #[inline(always)]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        Ok(Self(<[u8; HASH_SIZE]>::try_from(bytes).map_err(|_| HashError::InvalidLength(bytes.len()))?))
    }

    /// Builds a hash whose first 8 bytes hold `word` in little-endian order.
    #[inline(always)]
    pub fn from_u64_word(word: u64) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[..8].copy_from_slice(&word.to_le_bytes());
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        *self == ZERO_HASH
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("invalid hash length {0}, expected 32 bytes")]
    InvalidLength(usize),

    #[error("invalid hex: {0}")]
    Hex(String),
}

impl From<faster_hex::Error> for HashError {
    fn from(err: faster_hex::Error) -> Self {
        HashError::Hex(err.to_string())
    }
}

impl AsRef<[u8; HASH_SIZE]> for Hash {
    #[inline(always)]
    fn as_ref(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Hash {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<u64> for Hash {
    fn from(word: u64) -> Self {
        Self::from_u64_word(word)
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = [0u8; HASH_SIZE * 2];
        faster_hex::hex_encode(&self.0, &mut hex).map_err(|_| std::fmt::Error)?;
        f.write_str(str::from_utf8(&hex).map_err(|_| std::fmt::Error)?)
    }
}

impl Debug for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(hash_str: &str) -> Result<Self, Self::Err> {
        if hash_str.len() != HASH_SIZE * 2 {
            return Err(HashError::InvalidLength(hash_str.len() / 2));
        }
        let mut bytes = [0u8; HASH_SIZE];
        faster_hex::hex_decode(hash_str.as_bytes(), &mut bytes)?;
        Ok(Hash(bytes))
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = <String as Deserialize>::deserialize(deserializer)?;
            Hash::from_str(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8> as Deserialize>::deserialize(deserializer)?;
            Hash::from_slice(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

//!
//! Error types emitted by key handling.
//!

use thiserror::Error;

/// [`Error`](enum@Error) variants emitted by key handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Zero, or not below the curve order. The key bytes are never included.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Hex decoding -> {0}")]
    Hex(String),

    #[error(transparent)]
    Address(#[from] kastx_addresses::AddressError),
}

impl From<faster_hex::Error> for Error {
    fn from(err: faster_hex::Error) -> Self {
        Error::Hex(err.to_string())
    }
}

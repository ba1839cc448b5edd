use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("Secp256k1 -> {0}")]
    Secp256k1Error(#[from] secp256k1::Error),

    #[error("Signature must be {expected} bytes, got {actual}")]
    SignatureLength { expected: usize, actual: usize },

    #[error("Input {0} is not signed")]
    EmptySignatureScript(usize),

    #[error("Input {index} signature script is malformed")]
    MalformedSignatureScript { index: usize },

    #[error("Input {index} spends a script that cannot be verified by signature")]
    UnsupportedScript { index: usize },

    #[error("Invalid sighash type {0:#04x}")]
    InvalidSigHashType(u8),

    #[error("Signature of input {0} does not verify")]
    InvalidSignature(usize),

    #[error("Transaction has {inputs} inputs but {entries} spent entries")]
    EntryCountMismatch { inputs: usize, entries: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Invalid number in field `{field}`: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid hex in field `{field}`: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    #[error("Field `{field}` must be {expected} bytes, got {actual}")]
    InvalidLength { field: &'static str, expected: usize, actual: usize },

    #[error("Invalid transaction id: {0}")]
    InvalidTransactionId(#[from] kastx_hashes::HashError),
}

pub type SignResult<T> = std::result::Result<T, SignError>;
pub type SerializationResult<T> = std::result::Result<T, SerializationError>;

//!
//! Error types emitted by transaction building and signing.
//!

use thiserror::Error;

/// [`Error`](enum@Error) variants emitted by transaction building and signing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Address -> {0}")]
    Address(#[from] kastx_addresses::AddressError),

    #[error("Script -> {0}")]
    TxScript(#[from] kastx_txscript::TxScriptError),

    #[error("Signing -> {0}")]
    Sign(#[from] kastx_consensus_core::errors::SignError),

    #[error(transparent)]
    Keys(#[from] kastx_wallet_keys::error::Error),

    #[error("A transaction may have at most {max} recipient outputs")]
    TooManyRecipients { max: usize },

    #[error("Output of {amount} sompi to {address} is below the dust threshold")]
    DustOutput { address: String, amount: u64 },

    #[error("Insufficient funds: required {required}, available {available}, short by {shortfall} sompi")]
    InsufficientFunds { required: u64, available: u64, shortfall: u64 },

    #[error("Amount overflow")]
    AmountOverflow,

    #[error("Transaction mass {mass} exceeds the standard limit of {limit}")]
    MassLimitExceeded { mass: u64, limit: u64 },

    #[error("Transaction has no inputs")]
    NoInputs,

    #[error("Change is already settled, the transaction can no longer be modified")]
    ChangeSettled,

    #[error("Input {index} spends a script this wallet cannot sign")]
    UnsupportedScript { index: usize },

    #[error("The private key for input {index} does not match the spent script")]
    KeyMismatch { index: usize },

    #[error("UTXO source -> {0}")]
    UtxoSource(String),

    #[error("Submission -> {0}")]
    Submission(String),

    #[error("Settings -> {0}")]
    Settings(String),

    #[error("I/O -> {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

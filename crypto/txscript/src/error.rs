use kastx_addresses::AddressError;
use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum TxScriptError {
    #[error("unsupported public key type")]
    PubKeyFormat,

    #[error("invalid signature length {0}")]
    SigLength(usize),

    #[error("address payload of {actual} bytes does not fit a {expected}-byte script push")]
    InvalidPayloadLength { expected: usize, actual: usize },

    #[error("{0}")]
    Address(#[from] AddressError),

    #[error(transparent)]
    ScriptBuilder(#[from] crate::script_builder::ScriptBuilderError),
}

//!
//! Hooks into the signing pass of the [`TransactionBuilder`](super::TransactionBuilder).
//!
//! Observers receive digests and signature scripts, which are public data.
//! Private keys never reach an observer.
//!

use kastx_consensus_core::tx::TransactionId;
use kastx_hashes::Hash;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    Schnorr,
    Ecdsa,
}

impl Display for SignatureScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureScheme::Schnorr => f.write_str("schnorr"),
            SignatureScheme::Ecdsa => f.write_str("ecdsa"),
        }
    }
}

pub trait SigningObserver: Send + Sync {
    fn on_sighash(&self, _input_index: usize, _scheme: SignatureScheme, _digest: &Hash) {}

    fn on_input_signed(&self, _input_index: usize, _signature_script: &[u8]) {}

    fn on_transaction_signed(&self, _id: &TransactionId) {}
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SigningObserver for NoopObserver {}

/// Traces every event through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SigningObserver for LogObserver {
    fn on_sighash(&self, input_index: usize, scheme: SignatureScheme, digest: &Hash) {
        log::trace!("input {input_index}: {scheme} sighash {digest}");
    }

    fn on_input_signed(&self, input_index: usize, signature_script: &[u8]) {
        log::trace!("input {input_index}: signature script of {} bytes", signature_script.len());
    }

    fn on_transaction_signed(&self, id: &TransactionId) {
        log::trace!("transaction {id} signed");
    }
}

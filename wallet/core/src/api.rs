//!
//! Interfaces to the collaborators the wallet relies on but does not implement:
//! a source of UTXOs and a node that accepts signed transactions.
//!
//! Implementations typically wrap a node RPC client. Their errors are carried
//! as strings so that no transport type leaks into this crate.
//!

use crate::{error::Error, result::Result, tx::SignedTransaction, utxo::UtxoForSigning};
use async_trait::async_trait;
use kastx_addresses::Address;
use kastx_consensus_core::tx::{Transaction, TransactionId};

#[async_trait]
pub trait UtxoSource: Send + Sync {
    async fn get_utxos_by_addresses(&self, addresses: Vec<Address>) -> std::result::Result<Vec<UtxoForSigning>, String>;
}

#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit_transaction(&self, transaction: &Transaction) -> std::result::Result<TransactionId, String>;
}

pub async fn fetch_utxos(source: &dyn UtxoSource, addresses: Vec<Address>) -> Result<Vec<UtxoForSigning>> {
    log::debug!("fetching utxos for {} addresses", addresses.len());
    let utxos = source.get_utxos_by_addresses(addresses).await.map_err(Error::UtxoSource)?;
    log::debug!("received {} utxos", utxos.len());
    Ok(utxos)
}

/// Submits `signed` and returns the id the node reports for it.
pub async fn submit(submitter: &dyn TransactionSubmitter, signed: &SignedTransaction) -> Result<TransactionId> {
    let id = submitter.submit_transaction(&signed.transaction).await.map_err(|err| {
        log::warn!("submission of transaction {} failed: {err}", signed.id());
        Error::Submission(err)
    })?;
    log::debug!("submitted transaction {id}");
    Ok(id)
}

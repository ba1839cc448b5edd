//!
//! UTXO references consumed by the transaction builder.
//!

use crate::result::Result;
use kastx_addresses::Address;
use kastx_consensus_core::{
    network::NetworkType,
    tx::{TransactionOutpoint, UtxoEntry},
};
use kastx_txscript::{extract_script_pub_key_address, script_class::ScriptClass};
use serde::{Deserialize, Serialize};

/// An unspent output together with the consensus state needed to sign a spend of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoForSigning {
    pub outpoint: TransactionOutpoint,
    #[serde(rename = "utxoEntry")]
    pub entry: UtxoEntry,
}

impl UtxoForSigning {
    pub fn new(outpoint: TransactionOutpoint, entry: UtxoEntry) -> Self {
        Self { outpoint, entry }
    }

    pub fn amount(&self) -> u64 {
        self.entry.amount
    }

    /// Classifies the locking script, which decides the signature scheme.
    pub fn address_type(&self) -> ScriptClass {
        ScriptClass::from_script(&self.entry.script_public_key)
    }

    /// The address the output pays to, for standard scripts.
    pub fn address(&self, network: NetworkType) -> Result<Address> {
        Ok(extract_script_pub_key_address(&self.entry.script_public_key, network.into())?)
    }
}

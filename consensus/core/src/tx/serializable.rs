//! Wire form of a transaction.
//!
//! Every 64-bit quantity travels as a decimal string so that JSON consumers
//! backed by double precision floats never lose precision. Byte fields are hex.

use crate::{
    errors::{SerializationError, SerializationResult},
    subnets::SubnetworkId,
    tx::{ScriptPublicKey, Transaction, TransactionId, TransactionIndexType, TransactionInput, TransactionOutpoint, TransactionOutput},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableOutpoint {
    pub transaction_id: String,
    pub index: TransactionIndexType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableTransactionInput {
    pub previous_outpoint: SerializableOutpoint,
    pub signature_script: String,
    pub sequence: String,
    pub sig_op_count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableScriptPublicKey {
    pub version: u16,
    pub script_public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableTransactionOutput {
    pub amount: String,
    pub script_public_key: SerializableScriptPublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableTransaction {
    pub version: u16,
    pub inputs: Vec<SerializableTransactionInput>,
    pub outputs: Vec<SerializableTransactionOutput>,
    pub lock_time: String,
    pub subnetwork_id: String,
    pub gas: String,
    pub payload: String,
}

impl SerializableTransaction {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn parse_u64(field: &'static str, value: &str) -> SerializationResult<u64> {
    // `u64::from_str` tolerates a leading '+', the wire form does not
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SerializationError::InvalidNumber { field, value: value.to_string() });
    }
    value.parse().map_err(|_| SerializationError::InvalidNumber { field, value: value.to_string() })
}

fn parse_hex(field: &'static str, value: &str) -> SerializationResult<Vec<u8>> {
    hex::decode(value).map_err(|err| SerializationError::InvalidHex { field, reason: err.to_string() })
}

impl From<&TransactionInput> for SerializableTransactionInput {
    fn from(input: &TransactionInput) -> Self {
        Self {
            previous_outpoint: SerializableOutpoint {
                transaction_id: input.previous_outpoint.transaction_id.to_string(),
                index: input.previous_outpoint.index,
            },
            signature_script: hex::encode(&input.signature_script),
            sequence: input.sequence.to_string(),
            sig_op_count: input.sig_op_count,
        }
    }
}

impl TryFrom<&SerializableTransactionInput> for TransactionInput {
    type Error = SerializationError;

    fn try_from(input: &SerializableTransactionInput) -> SerializationResult<Self> {
        let transaction_id = TransactionId::from_str(&input.previous_outpoint.transaction_id)?;
        Ok(Self {
            previous_outpoint: TransactionOutpoint::new(transaction_id, input.previous_outpoint.index),
            signature_script: parse_hex("signatureScript", &input.signature_script)?,
            sequence: parse_u64("sequence", &input.sequence)?,
            sig_op_count: input.sig_op_count,
        })
    }
}

impl From<&TransactionOutput> for SerializableTransactionOutput {
    fn from(output: &TransactionOutput) -> Self {
        Self {
            amount: output.value.to_string(),
            script_public_key: SerializableScriptPublicKey {
                version: output.script_public_key.version(),
                script_public_key: hex::encode(output.script_public_key.script()),
            },
        }
    }
}

impl TryFrom<&SerializableTransactionOutput> for TransactionOutput {
    type Error = SerializationError;

    fn try_from(output: &SerializableTransactionOutput) -> SerializationResult<Self> {
        let script = parse_hex("scriptPublicKey", &output.script_public_key.script_public_key)?;
        Ok(Self {
            value: parse_u64("amount", &output.amount)?,
            script_public_key: ScriptPublicKey::from_vec(output.script_public_key.version, script),
        })
    }
}

impl From<&Transaction> for SerializableTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            version: tx.version,
            inputs: tx.inputs.iter().map(Into::into).collect(),
            outputs: tx.outputs.iter().map(Into::into).collect(),
            lock_time: tx.lock_time.to_string(),
            subnetwork_id: tx.subnetwork_id.to_string(),
            gas: tx.gas.to_string(),
            payload: hex::encode(&tx.payload),
        }
    }
}

impl TryFrom<&SerializableTransaction> for Transaction {
    type Error = SerializationError;

    fn try_from(tx: &SerializableTransaction) -> SerializationResult<Self> {
        let inputs = tx.inputs.iter().map(TryInto::try_into).collect::<SerializationResult<Vec<_>>>()?;
        let outputs = tx.outputs.iter().map(TryInto::try_into).collect::<SerializationResult<Vec<_>>>()?;
        let subnetwork_id = SubnetworkId::from_str(&tx.subnetwork_id)
            .map_err(|err| SerializationError::InvalidHex { field: "subnetworkId", reason: err.to_string() })?;
        Ok(Transaction::new(
            tx.version,
            inputs,
            outputs,
            parse_u64("lockTime", &tx.lock_time)?,
            subnetwork_id,
            parse_u64("gas", &tx.gas)?,
            parse_hex("payload", &tx.payload)?,
        ))
    }
}

impl TryFrom<SerializableTransaction> for Transaction {
    type Error = SerializationError;

    fn try_from(tx: SerializableTransaction) -> SerializationResult<Self> {
        Transaction::try_from(&tx)
    }
}

use crate::{
    error::TxScriptError,
    opcodes::codes::{OpBlake2b, OpCheckSig, OpCheckSigECDSA, OpData32, OpData33, OpData65, OpEqual},
    script_builder::ScriptBuilder,
    script_class::ScriptClass,
};
use blake2b_simd::Params;
use kastx_addresses::{Address, Prefix, Version};
use kastx_consensus_core::{
    constants::SIGNATURE_SIZE,
    hashing::sighash_type::SigHashType,
    tx::{ScriptPublicKey, ScriptVec},
};
use smallvec::SmallVec;
use std::iter::once;

fn check_payload_len(payload: &[u8], expected: usize) -> Result<(), TxScriptError> {
    if payload.len() != expected {
        return Err(TxScriptError::InvalidPayloadLength { expected, actual: payload.len() });
    }
    Ok(())
}

/// Creates a new script to pay a transaction output to a 32-byte pubkey.
fn pay_to_pub_key(address_payload: &[u8]) -> Result<ScriptVec, TxScriptError> {
    check_payload_len(address_payload, 32)?;
    Ok(SmallVec::from_iter(once(OpData32).chain(address_payload.iter().copied()).chain(once(OpCheckSig))))
}

/// Creates a new script to pay a transaction output to a 33-byte ECDSA pubkey.
fn pay_to_pub_key_ecdsa(address_payload: &[u8]) -> Result<ScriptVec, TxScriptError> {
    check_payload_len(address_payload, 33)?;
    Ok(SmallVec::from_iter(once(OpData33).chain(address_payload.iter().copied()).chain(once(OpCheckSigECDSA))))
}

/// Creates a new script to pay a transaction output to a script hash.
fn pay_to_script_hash(script_hash: &[u8]) -> Result<ScriptVec, TxScriptError> {
    check_payload_len(script_hash, 32)?;
    Ok(SmallVec::from_iter([OpBlake2b, OpData32].iter().copied().chain(script_hash.iter().copied()).chain(once(OpEqual))))
}

/// Creates a new script to pay a transaction output to the specified address.
///
/// Fails only when the address payload length does not match its version,
/// which a decoded address never does.
pub fn pay_to_address_script(address: &Address) -> Result<ScriptPublicKey, TxScriptError> {
    let script = match address.version {
        Version::PubKey => pay_to_pub_key(address.payload.as_slice())?,
        Version::PubKeyECDSA => pay_to_pub_key_ecdsa(address.payload.as_slice())?,
        Version::ScriptHash => pay_to_script_hash(address.payload.as_slice())?,
    };
    Ok(ScriptPublicKey::new(ScriptClass::from(address.version).version(), script))
}

/// Decodes an address string and returns the script paying to it.
pub fn address_to_script(address: &str) -> Result<ScriptPublicKey, TxScriptError> {
    let address = Address::try_from(address)?;
    pay_to_address_script(&address)
}

/// Hash committed to by a pay-to-script-hash script: unkeyed BLAKE2b-256 of the redeem script.
pub fn redeem_script_hash(redeem_script: &[u8]) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(Params::new().hash_length(32).to_state().update(redeem_script).finalize().as_bytes());
    hash
}

/// Takes a script and returns an equivalent pay-to-script-hash script
pub fn pay_to_script_hash_script(redeem_script: &[u8]) -> ScriptPublicKey {
    let script: ScriptVec = SmallVec::from_iter(
        [OpBlake2b, OpData32].iter().copied().chain(redeem_script_hash(redeem_script)).chain(once(OpEqual)),
    );
    ScriptPublicKey::new(ScriptClass::ScriptHash.version(), script)
}

/// Generates a signature script that fits a pay-to-script-hash script
pub fn pay_to_script_hash_signature_script(redeem_script: &[u8], signature: &[u8]) -> Result<Vec<u8>, TxScriptError> {
    let redeem_script_as_data = ScriptBuilder::new().add_data(redeem_script)?.drain();
    Ok(Vec::from_iter(signature.iter().copied().chain(redeem_script_as_data)))
}

/// Unlocking script for a pay-to-pubkey output: `OpData65 || signature || hash_type`.
pub fn signature_script(signature: &[u8], hash_type: SigHashType) -> Result<Vec<u8>, TxScriptError> {
    if signature.len() != SIGNATURE_SIZE {
        return Err(TxScriptError::SigLength(signature.len()));
    }
    let mut script = Vec::with_capacity(SIGNATURE_SIZE + 2);
    script.push(OpData65);
    script.extend_from_slice(signature);
    script.push(hash_type.to_u8());
    Ok(script)
}

/// Returns the address encoded in a script public key.
///
/// Only standard script classes map to an address. Use `ScriptClass::from(address.version)`
/// on the returned address when the class is needed too.
pub fn extract_script_pub_key_address(script_public_key: &ScriptPublicKey, prefix: Prefix) -> Result<Address, TxScriptError> {
    let class = ScriptClass::from_script(script_public_key);
    if script_public_key.version() > class.version() {
        return Err(TxScriptError::PubKeyFormat);
    }
    let script = script_public_key.script();
    let address = match class {
        ScriptClass::NonStandard => return Err(TxScriptError::PubKeyFormat),
        ScriptClass::PubKey => Address::try_new(prefix, Version::PubKey, &script[1..33])?,
        ScriptClass::PubKeyECDSA => Address::try_new(prefix, Version::PubKeyECDSA, &script[1..34])?,
        ScriptClass::ScriptHash => Address::try_new(prefix, Version::ScriptHash, &script[2..34])?,
    };
    Ok(address)
}

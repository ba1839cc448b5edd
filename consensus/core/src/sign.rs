use crate::{
    constants::{SIGNATURE_PUSH_LEN, SIGNATURE_SIZE},
    errors::{SignError, SignResult},
    hashing::{
        sighash::{calc_ecdsa_signature_hash, calc_schnorr_signature_hash, SigHashReusedValues},
        sighash_type::SigHashType,
    },
    tx::PopulatedTransaction,
};
use kastx_hashes::Hash;
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId, Signature as EcdsaSignature},
    schnorr::Signature as SchnorrSignature,
    Keypair, Message, PublicKey, SecretKey, XOnlyPublicKey, SECP256K1,
};

#[inline]
fn message(digest: Hash) -> Message {
    Message::from_digest(digest.as_bytes())
}

fn check_signature_length(signature: &[u8]) -> SignResult<()> {
    if signature.len() != SIGNATURE_SIZE {
        return Err(SignError::SignatureLength { expected: SIGNATURE_SIZE, actual: signature.len() });
    }
    Ok(())
}

/// Signs `digest` with ECDSA, returning the compact `r || s` form.
/// Nonces follow RFC 6979, so the same key and digest always give the same signature.
pub fn sign_ecdsa(secret_key: &SecretKey, digest: Hash) -> [u8; SIGNATURE_SIZE] {
    SECP256K1.sign_ecdsa(&message(digest), secret_key).serialize_compact()
}

/// Returns `Ok(false)` for a well-formed signature that does not match.
pub fn verify_ecdsa(signature: &[u8], digest: Hash, public_key: &PublicKey) -> SignResult<bool> {
    check_signature_length(signature)?;
    let Ok(signature) = EcdsaSignature::from_compact(signature) else {
        return Ok(false);
    };
    Ok(SECP256K1.verify_ecdsa(&message(digest), &signature, public_key).is_ok())
}

/// Candidate keys for each of the four recovery ids that verify `signature` over `digest`.
pub fn recover_public_key_candidates(signature: &[u8; SIGNATURE_SIZE], digest: Hash) -> Vec<PublicKey> {
    let msg = message(digest);
    let Ok(plain) = EcdsaSignature::from_compact(signature) else {
        return vec![];
    };
    (0..4)
        .filter_map(|id| {
            let recovery_id = RecoveryId::from_i32(id).ok()?;
            let recoverable = RecoverableSignature::from_compact(signature, recovery_id).ok()?;
            let public_key = SECP256K1.recover_ecdsa(&msg, &recoverable).ok()?;
            SECP256K1.verify_ecdsa(&msg, &plain, &public_key).is_ok().then_some(public_key)
        })
        .collect()
}

/// Recovers a public key from a compact signature lacking a recovery id by trying
/// every id in turn. Returns the first key that verifies, or `None`.
///
/// More than one key can verify the same signature, so callers holding an expected
/// key should compare against [`recover_public_key_candidates`].
pub fn recover_public_key(signature: &[u8; SIGNATURE_SIZE], digest: Hash) -> Option<PublicKey> {
    recover_public_key_candidates(signature, digest).into_iter().next()
}

/// Signs `digest` with BIP-340 Schnorr without auxiliary randomness, so signing is deterministic.
pub fn sign_schnorr(keypair: &Keypair, digest: Hash) -> [u8; SIGNATURE_SIZE] {
    *SECP256K1.sign_schnorr_no_aux_rand(&message(digest), keypair).as_ref()
}

/// Returns `Ok(false)` for a well-formed signature that does not match.
pub fn verify_schnorr(signature: &[u8], digest: Hash, public_key: &XOnlyPublicKey) -> SignResult<bool> {
    check_signature_length(signature)?;
    let Ok(signature) = SchnorrSignature::from_slice(signature) else {
        return Ok(false);
    };
    Ok(SECP256K1.verify_schnorr(&signature, &message(digest), public_key).is_ok())
}

enum SpentKey {
    Schnorr(XOnlyPublicKey),
    Ecdsa(PublicKey),
}

fn spent_key(script: &[u8], index: usize) -> SignResult<SpentKey> {
    match script {
        [0x20, key @ .., 0xac] if key.len() == 32 => Ok(SpentKey::Schnorr(XOnlyPublicKey::from_slice(key)?)),
        [0x21, key @ .., 0xab] if key.len() == 33 => Ok(SpentKey::Ecdsa(PublicKey::from_slice(key)?)),
        _ => Err(SignError::UnsupportedScript { index }),
    }
}

/// Splits a `OpData65 || signature || sighash type` script.
fn parse_signature_script(script: &[u8], index: usize) -> SignResult<(&[u8], SigHashType)> {
    match script {
        [] => Err(SignError::EmptySignatureScript(index)),
        [SIGNATURE_PUSH_LEN, signature @ .., hash_type] if signature.len() == SIGNATURE_SIZE => {
            Ok((signature, SigHashType::from_u8(*hash_type)?))
        }
        _ => Err(SignError::MalformedSignatureScript { index }),
    }
}

/// Checks every input's signature script against the key in the script it spends.
/// Only pay-to-pubkey scripts of either scheme can be verified this way.
pub fn verify_transaction(tx: &PopulatedTransaction) -> SignResult<()> {
    if tx.tx.inputs.len() != tx.entries.len() {
        return Err(SignError::EntryCountMismatch { inputs: tx.tx.inputs.len(), entries: tx.entries.len() });
    }
    let mut reused_values = SigHashReusedValues::new();
    for (index, (input, entry)) in tx.populated_inputs().enumerate() {
        let (signature, hash_type) = parse_signature_script(&input.signature_script, index)?;
        let valid = match spent_key(entry.script_public_key.script(), index)? {
            SpentKey::Schnorr(public_key) => {
                let digest = calc_schnorr_signature_hash(tx, index, hash_type, &mut reused_values);
                verify_schnorr(signature, digest, &public_key)?
            }
            SpentKey::Ecdsa(public_key) => {
                let digest = calc_ecdsa_signature_hash(tx, index, hash_type, &mut reused_values);
                verify_ecdsa(signature, digest, &public_key)?
            }
        };
        if !valid {
            return Err(SignError::InvalidSignature(index));
        }
    }
    Ok(())
}

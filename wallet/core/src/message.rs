//!
//! Schnorr signing of free-form text messages, domain-separated from
//! transaction signing so a message signature can never authorize a spend.
//!

use crate::result::Result;
use kastx_consensus_core::{
    constants::SIGNATURE_SIZE,
    sign::{sign_schnorr, verify_schnorr},
};
use kastx_hashes::{encode_varint, Hash, Hasher, HasherBase, PersonalMessageSigningHash};
use kastx_wallet_keys::privatekey::PrivateKey;
use secp256k1::XOnlyPublicKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonalMessage<'a>(pub &'a str);

impl AsRef<[u8]> for PersonalMessage<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Digest of the length-prefixed message under the personal message domain.
pub fn calc_personal_message_hash(msg: &PersonalMessage) -> Hash {
    let mut hasher = PersonalMessageSigningHash::new();
    hasher.update(encode_varint(msg.0.len() as u64)).update(msg);
    hasher.finalize()
}

pub fn sign_message(msg: &PersonalMessage, private_key: &PrivateKey) -> Result<[u8; SIGNATURE_SIZE]> {
    let keypair = secp256k1::Keypair::from_secret_key(secp256k1::SECP256K1, private_key.as_secret_key());
    Ok(sign_schnorr(&keypair, calc_personal_message_hash(msg)))
}

/// Returns `Ok(false)` for a well-formed signature made over another message or by another key.
pub fn verify_message(msg: &PersonalMessage, signature: &[u8], public_key: &XOnlyPublicKey) -> Result<bool> {
    Ok(verify_schnorr(signature, calc_personal_message_hash(msg), public_key)?)
}

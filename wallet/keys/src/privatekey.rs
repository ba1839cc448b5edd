//!
//! Private Key
//!

use crate::{error::Error, keypair::Keypair, publickey::PublicKey, result::Result};
use kastx_addresses::Address;
use kastx_consensus_core::network::NetworkType;
use zeroize::Zeroizing;

pub const PRIVATE_KEY_SIZE: usize = 32;

/// A secp256k1 secret scalar, guaranteed non-zero and below the curve order.
///
/// The secret is never formatted by `Debug` and is erased when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    inner: secp256k1::SecretKey,
}

impl PrivateKey {
    /// Create a new [`PrivateKey`] from a hex-encoded string.
    pub fn try_new(key: &str) -> Result<PrivateKey> {
        if key.len() != PRIVATE_KEY_SIZE * 2 {
            return Err(Error::InvalidKeyLength { expected: PRIVATE_KEY_SIZE, actual: key.len() / 2 });
        }
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        faster_hex::hex_decode(key.as_bytes(), bytes.as_mut_slice())?;
        Self::try_from_slice(bytes.as_slice())
    }

    pub fn try_from_slice(data: &[u8]) -> Result<PrivateKey> {
        if data.len() != PRIVATE_KEY_SIZE {
            return Err(Error::InvalidKeyLength { expected: PRIVATE_KEY_SIZE, actual: data.len() });
        }
        let inner = secp256k1::SecretKey::from_slice(data).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self { inner })
    }

    pub fn secret_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        Zeroizing::new(self.inner.secret_bytes())
    }

    /// Returns the key encoded as a hex string. This is an explicit export of secret material.
    pub fn to_hex(&self) -> Zeroizing<String> {
        let bytes = self.secret_bytes();
        let mut hex = Zeroizing::new(vec![0u8; PRIVATE_KEY_SIZE * 2]);
        faster_hex::hex_encode(bytes.as_slice(), hex.as_mut_slice()).expect("The output is exactly twice the size of the input");
        Zeroizing::new(hex.iter().map(|&b| b as char).collect())
    }

    pub fn as_secret_key(&self) -> &secp256k1::SecretKey {
        &self.inner
    }

    pub fn to_public_key(&self) -> PublicKey {
        PublicKey::from(secp256k1::PublicKey::from_secret_key_global(&self.inner))
    }

    /// Get the Schnorr (x-only pubkey) [`Address`] of this key on `network`.
    pub fn to_address(&self, network: NetworkType) -> Result<Address> {
        self.to_public_key().to_address(network)
    }

    /// Get the `ECDSA` [`Address`] of this key on `network`.
    pub fn to_address_ecdsa(&self, network: NetworkType) -> Result<Address> {
        self.to_public_key().to_address_ecdsa(network)
    }

    /// Generate a [`Keypair`] from this [`PrivateKey`].
    pub fn to_keypair(&self, network: NetworkType) -> Result<Keypair> {
        Keypair::from_private_key(self, network)
    }

    pub(crate) fn random() -> Self {
        Self { inner: secp256k1::SecretKey::new(&mut rand::thread_rng()) }
    }
}

impl From<&secp256k1::SecretKey> for PrivateKey {
    fn from(value: &secp256k1::SecretKey) -> Self {
        Self { inner: *value }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        // SecretKey compares in constant time
        self.inner == other.inner
    }
}

impl Eq for PrivateKey {}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.inner.non_secure_erase();
    }
}

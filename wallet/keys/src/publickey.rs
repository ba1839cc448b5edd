//!
//! Public Key
//!

use crate::{error::Error, result::Result};
use kastx_addresses::{Address, Version as AddressVersion};
use kastx_consensus_core::network::NetworkType;
use secp256k1::XOnlyPublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub const PUBLIC_KEY_SIZE: usize = 33;

/// A compressed secp256k1 point. Schnorr addresses use its x coordinate,
/// ECDSA addresses the full 33 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    inner: secp256k1::PublicKey,
}

impl PublicKey {
    /// Create a new [`PublicKey`] from a hex-encoded compressed point.
    pub fn try_new(key: &str) -> Result<PublicKey> {
        if key.len() != PUBLIC_KEY_SIZE * 2 {
            return Err(Error::InvalidKeyLength { expected: PUBLIC_KEY_SIZE, actual: key.len() / 2 });
        }
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        faster_hex::hex_decode(key.as_bytes(), &mut bytes)?;
        Self::try_from_slice(&bytes)
    }

    pub fn try_from_slice(data: &[u8]) -> Result<PublicKey> {
        if data.len() != PUBLIC_KEY_SIZE {
            return Err(Error::InvalidKeyLength { expected: PUBLIC_KEY_SIZE, actual: data.len() });
        }
        let inner = secp256k1::PublicKey::from_slice(data).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { inner })
    }

    pub fn serialize(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.inner.serialize()
    }

    pub fn x_only(&self) -> XOnlyPublicKey {
        self.inner.x_only_public_key().0
    }

    /// Get the Schnorr [`Address`] of this key, paying to its x coordinate.
    pub fn to_address(&self, network: NetworkType) -> Result<Address> {
        Ok(Address::try_new(network.into(), AddressVersion::PubKey, &self.x_only().serialize())?)
    }

    /// Get the `ECDSA` [`Address`] of this key, paying to the compressed point.
    pub fn to_address_ecdsa(&self, network: NetworkType) -> Result<Address> {
        Ok(Address::try_new(network.into(), AddressVersion::PubKeyECDSA, &self.serialize())?)
    }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(inner: secp256k1::PublicKey) -> Self {
        Self { inner }
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = [0u8; PUBLIC_KEY_SIZE * 2];
        faster_hex::hex_encode(&self.serialize(), &mut hex).map_err(|_| std::fmt::Error)?;
        f.write_str(std::str::from_utf8(&hex).map_err(|_| std::fmt::Error)?)
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_new(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        PublicKey::try_new(&s).map_err(serde::de::Error::custom)
    }
}

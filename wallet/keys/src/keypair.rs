//!
//! [`keypair`](mod@self) module encapsulates [`Keypair`]: a [`PrivateKey`],
//! its [`PublicKey`] and the Schnorr address they control on one network.
//!
//! ```
//! use kastx_consensus_core::network::NetworkType;
//! use kastx_wallet_keys::prelude::*;
//!
//! let keypair = Keypair::random(NetworkType::Testnet).unwrap();
//! assert!(keypair.address().to_string().starts_with("kaspatest:"));
//! ```
//!

use crate::{privatekey::PrivateKey, publickey::PublicKey, result::Result};
use kastx_addresses::Address;
use kastx_consensus_core::network::NetworkType;

/// Data structure that contains a secret and public keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keypair {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: Address,
    network: NetworkType,
}

impl Keypair {
    /// Create a new [`Keypair`] from a [`PrivateKey`].
    pub fn from_private_key(private_key: &PrivateKey, network: NetworkType) -> Result<Keypair> {
        let public_key = private_key.to_public_key();
        let address = public_key.to_address(network)?;
        Ok(Keypair { private_key: private_key.clone(), public_key, address, network })
    }

    /// Create a new random [`Keypair`].
    pub fn random(network: NetworkType) -> Result<Keypair> {
        Self::from_private_key(&PrivateKey::random(), network)
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The Schnorr address of this keypair.
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Get the `ECDSA` [`Address`] of this keypair on its network.
    pub fn to_address_ecdsa(&self) -> Result<Address> {
        self.public_key.to_address_ecdsa(self.network)
    }

    /// The secp256k1 keypair used for Schnorr signing.
    pub fn to_secp_keypair(&self) -> secp256k1::Keypair {
        secp256k1::Keypair::from_secret_key(secp256k1::SECP256K1, self.private_key.as_secret_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_from_private_key() {
        let private_key = PrivateKey::try_new("0000000000000000000000000000000000000000000000000000000000000002").unwrap();
        let keypair = Keypair::from_private_key(&private_key, NetworkType::Mainnet).unwrap();
        // cspell:disable
        assert_eq!(keypair.address().to_string(), "kaspa:qrrqglu5g8kh6mfsg4qxa9wq0nv9cauwfwxw70984wkqnw2uwz0w23n3jj3wt");
        // cspell:enable
        assert_eq!(keypair.public_key(), &private_key.to_public_key());
        assert_eq!(keypair.network(), NetworkType::Mainnet);
        assert_eq!(keypair.to_secp_keypair().x_only_public_key().0, keypair.public_key().x_only());
        assert_eq!(keypair.to_address_ecdsa().unwrap(), private_key.to_address_ecdsa(NetworkType::Mainnet).unwrap());
    }

    #[test]
    fn test_random_keypairs_differ() {
        let a = Keypair::random(NetworkType::Simnet).unwrap();
        let b = Keypair::random(NetworkType::Simnet).unwrap();
        assert_ne!(a, b);
        assert!(a.address().to_string().starts_with("kaspasim:"));
        assert!(!format!("{a:?}").contains(&*a.private_key().to_hex()));
    }
}

//!
//! # Kastx Wallet Core
//!
//! Builds, fee-prices and signs transactions from UTXOs supplied by the
//! caller, and defines the interfaces through which UTXOs are fetched and
//! signed transactions are submitted.
//!
//! ```
//! use kastx_consensus_core::{network::NetworkType, tx::{ScriptPublicKey, TransactionId, TransactionOutpoint, UtxoEntry}};
//! use kastx_txscript::pay_to_address_script;
//! use kastx_wallet_core::prelude::*;
//! use kastx_wallet_keys::prelude::*;
//!
//! # fn main() -> kastx_wallet_core::Result<()> {
//! let keypair = Keypair::random(NetworkType::Mainnet)?;
//! let spk = pay_to_address_script(keypair.address())?;
//! let utxo = UtxoForSigning::new(TransactionOutpoint::new(TransactionId::from_u64_word(1), 0), UtxoEntry::new(50_000, spk, 0, false));
//!
//! let mut builder = TransactionBuilder::default();
//! builder.add_input(utxo, keypair.private_key().clone())?;
//! builder.add_output(&keypair.address().to_string(), 20_000)?;
//! builder.set_fee(estimate_fee(1, 2, 1.0).fee)?;
//! builder.add_change_output(&keypair.address().to_string())?;
//! let signed = builder.sign()?;
//! assert!(signed.transaction.is_fully_signed());
//! # Ok(())
//! # }
//! ```
//!

pub mod api;
pub mod error;
pub mod message;
pub mod prelude;
pub mod result;
pub mod settings;
pub mod tx;
pub mod utxo;

pub use kastx_addresses::{Address, Prefix as AddressPrefix};
pub use result::Result;

//!
//! # Kastx Wallet Keys
//!
//! Secret and public key material for signing transactions, and the
//! addresses those keys lock funds to.
//!

pub mod error;
pub mod keypair;
pub mod prelude;
pub mod privatekey;
pub mod publickey;
pub mod result;

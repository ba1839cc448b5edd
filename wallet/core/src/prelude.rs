//!
//! Re-exports of the most commonly used types and traits in this crate.
//!

pub use crate::api::{fetch_utxos, submit, TransactionSubmitter, UtxoSource};
pub use crate::message::{sign_message, verify_message, PersonalMessage};
pub use crate::settings::TransactionBuilderSettings;
pub use crate::tx::*;
pub use crate::utxo::UtxoForSigning;

//!
//! Policy settings of the [`TransactionBuilder`](crate::tx::TransactionBuilder),
//! loadable from TOML.
//!
//! ```toml
//! max_recipient_outputs = 2
//! minimum_change = 0
//! minimum_relay_fee = 1000
//! sequence = 0
//! enforce_dust_policy = true
//! ```
//!

use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_RECIPIENT_OUTPUTS: usize = 2;
/// Minimum relay fee in sompi per 1000 bytes, as used by the dust rule.
pub const DEFAULT_MINIMUM_RELAY_FEE: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionBuilderSettings {
    /// Recipient outputs a transaction may carry. The change output is not counted.
    pub max_recipient_outputs: usize,
    /// Change below this many sompi is left to the fee instead of creating an output.
    pub minimum_change: u64,
    pub minimum_relay_fee: u64,
    /// Sequence number given to every input.
    pub sequence: u64,
    /// Reject dust recipient outputs and fold dust change into the fee.
    pub enforce_dust_policy: bool,
}

impl Default for TransactionBuilderSettings {
    fn default() -> Self {
        Self {
            max_recipient_outputs: DEFAULT_MAX_RECIPIENT_OUTPUTS,
            minimum_change: 0,
            minimum_relay_fee: DEFAULT_MINIMUM_RELAY_FEE,
            sequence: 0,
            enforce_dust_policy: true,
        }
    }
}

impl TransactionBuilderSettings {
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading transaction builder settings from `{}`", path.display());
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

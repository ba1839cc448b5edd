use crate::{
    opcodes::codes::{OpBlake2b, OpCheckSig, OpCheckSigECDSA, OpData32, OpData33, OpEqual},
    MAX_SCRIPT_PUBLIC_KEY_VERSION,
};
use kastx_addresses::Version;
use kastx_consensus_core::tx::{ScriptPublicKey, ScriptPublicKeyVersion};
use std::fmt::{Display, Formatter};

/// Standard classes of locking scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    /// None of the recognized forms
    NonStandard = 0,
    /// Pay to x-only pubkey, spent with a Schnorr signature
    PubKey,
    /// Pay to compressed pubkey, spent with an ECDSA signature
    PubKeyECDSA,
    /// Pay to script hash
    ScriptHash,
}

const NON_STANDARD: &str = "nonstandard";
const PUB_KEY: &str = "pubkey";
const PUB_KEY_ECDSA: &str = "pubkeyecdsa";
const SCRIPT_HASH: &str = "scripthash";

impl ScriptClass {
    pub fn from_script(script_public_key: &ScriptPublicKey) -> Self {
        let script = script_public_key.script();
        if script_public_key.version() == MAX_SCRIPT_PUBLIC_KEY_VERSION {
            if Self::is_pay_to_pubkey(script) {
                ScriptClass::PubKey
            } else if Self::is_pay_to_pubkey_ecdsa(script) {
                ScriptClass::PubKeyECDSA
            } else if Self::is_pay_to_script_hash(script) {
                ScriptClass::ScriptHash
            } else {
                ScriptClass::NonStandard
            }
        } else {
            ScriptClass::NonStandard
        }
    }

    // OpData32 <32-byte key> OpCheckSig
    #[inline(always)]
    pub fn is_pay_to_pubkey(script: &[u8]) -> bool {
        (script.len() == 34) && (script[0] == OpData32) && (script[33] == OpCheckSig)
    }

    // OpData33 <33-byte key> OpCheckSigECDSA
    #[inline(always)]
    pub fn is_pay_to_pubkey_ecdsa(script: &[u8]) -> bool {
        (script.len() == 35) && (script[0] == OpData33) && (script[34] == OpCheckSigECDSA)
    }

    // OpBlake2b OpData32 <32-byte hash> OpEqual
    #[inline(always)]
    pub fn is_pay_to_script_hash(script: &[u8]) -> bool {
        (script.len() == 35) && (script[0] == OpBlake2b) && (script[1] == OpData32) && (script[34] == OpEqual)
    }

    fn as_str(&self) -> &'static str {
        match self {
            ScriptClass::NonStandard => NON_STANDARD,
            ScriptClass::PubKey => PUB_KEY,
            ScriptClass::PubKeyECDSA => PUB_KEY_ECDSA,
            ScriptClass::ScriptHash => SCRIPT_HASH,
        }
    }

    /// Script public key version to use for scripts of this class.
    pub fn version(&self) -> ScriptPublicKeyVersion {
        match self {
            ScriptClass::NonStandard => 0,
            ScriptClass::PubKey | ScriptClass::PubKeyECDSA | ScriptClass::ScriptHash => MAX_SCRIPT_PUBLIC_KEY_VERSION,
        }
    }
}

impl Display for ScriptClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Version> for ScriptClass {
    fn from(version: Version) -> Self {
        match version {
            Version::PubKey => ScriptClass::PubKey,
            Version::PubKeyECDSA => ScriptClass::PubKeyECDSA,
            Version::ScriptHash => ScriptClass::ScriptHash,
        }
    }
}

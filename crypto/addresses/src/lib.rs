//!
//! Address encoding: `prefix:payload` strings carrying a version byte and a key or
//! script hash, protected by a 40-bit BCH checksum over a base-32 alphabet.
//!

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use thiserror::Error;

mod bech32;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("Invalid prefix {0}")]
    InvalidPrefix(String),

    #[error("Prefix is missing")]
    MissingPrefix,

    #[error("Invalid version {0}")]
    InvalidVersion(u8),

    #[error("Invalid character {0}")]
    DecodingError(char),

    #[error("Address mixes upper and lower case characters")]
    MixedCase,

    #[error("Checksum is invalid")]
    BadChecksum,

    #[error("Address payload is too short")]
    BadPayload,

    #[error("Non-zero or excess padding bits in address payload")]
    InvalidPadding,

    #[error("Invalid payload length {length} for version {version}, expected {expected}")]
    InvalidPayloadLength { version: Version, length: usize, expected: usize },
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum Prefix {
    #[serde(rename = "kaspa")]
    Mainnet = 0,
    #[serde(rename = "kaspatest")]
    Testnet = 1,
    #[serde(rename = "kaspasim")]
    Simnet = 2,
    #[serde(rename = "kaspadev")]
    Devnet = 3,
    #[cfg(test)]
    A = 254,
    #[cfg(test)]
    B = 255,
}

impl Prefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::Mainnet => "kaspa",
            Prefix::Testnet => "kaspatest",
            Prefix::Simnet => "kaspasim",
            Prefix::Devnet => "kaspadev",
            #[cfg(test)]
            Prefix::A => "a",
            #[cfg(test)]
            Prefix::B => "b",
        }
    }

    #[inline(always)]
    fn is_test(&self) -> bool {
        #[cfg(not(test))]
        return false;
        #[cfg(test)]
        matches!(self, Prefix::A | Prefix::B)
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Prefix {
    type Error = AddressError;

    fn try_from(prefix: &str) -> Result<Self, Self::Error> {
        match prefix {
            "kaspa" => Ok(Prefix::Mainnet),
            "kaspatest" => Ok(Prefix::Testnet),
            "kaspasim" => Ok(Prefix::Simnet),
            "kaspadev" => Ok(Prefix::Devnet),
            #[cfg(test)]
            "a" => Ok(Prefix::A),
            #[cfg(test)]
            "b" => Ok(Prefix::B),
            _ => Err(AddressError::InvalidPrefix(prefix.to_string())),
        }
    }
}

///
///  Address version (`PubKey`, `PubKey ECDSA`, `ScriptHash`)
///
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum Version {
    /// Schnorr x-only public key
    PubKey = 0,
    /// Compressed ECDSA public key
    PubKeyECDSA = 1,
    /// Hash of a redeem script
    ScriptHash = 8,
}

impl Version {
    pub fn public_key_len(&self) -> usize {
        match self {
            Version::PubKey => 32,
            Version::PubKeyECDSA => 33,
            Version::ScriptHash => 32,
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Version::PubKey),
            1 => Ok(Version::PubKeyECDSA),
            8 => Ok(Version::ScriptHash),
            _ => Err(AddressError::InvalidVersion(value)),
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Version::PubKey => "PubKey",
            Version::PubKeyECDSA => "PubKeyECDSA",
            Version::ScriptHash => "ScriptHash",
        })
    }
}

/// Size of the payload vector of an address, large enough for the 33-byte ECDSA key.
pub const PAYLOAD_VECTOR_SIZE: usize = 36;

pub type PayloadVec = SmallVec<[u8; PAYLOAD_VECTOR_SIZE]>;

/// Address that serializes to and from an address format string: `kaspa:qz0s...t8cv`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug, Hash)]
pub struct Address {
    pub prefix: Prefix,
    pub version: Version,
    pub payload: PayloadVec,
}

impl Address {
    /// Creates an address, checking the payload length against the version.
    pub fn try_new(prefix: Prefix, version: Version, payload: &[u8]) -> Result<Self, AddressError> {
        if !prefix.is_test() && payload.len() != version.public_key_len() {
            return Err(AddressError::InvalidPayloadLength { version, length: payload.len(), expected: version.public_key_len() });
        }
        Ok(Self { prefix, version, payload: PayloadVec::from_slice(payload) })
    }

    /// Returns true when `address` decodes successfully.
    pub fn validate(address: &str) -> bool {
        Self::try_from(address).is_ok()
    }

    pub fn payload_to_string(&self) -> String {
        self.encode_payload()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.prefix, self.encode_payload())
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl From<&Address> for String {
    fn from(address: &Address) -> Self {
        address.to_string()
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let has_lower = value.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = value.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(AddressError::MixedCase);
        }
        let value = if has_upper { value.to_ascii_lowercase() } else { value.to_string() };
        match value.rsplit_once(':') {
            Some((prefix, payload)) => Self::decode_payload(prefix.try_into()?, payload),
            None => Err(AddressError::MissingPrefix),
        }
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().try_into()
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}

//
// Borsh serializers need to be manually implemented for `Address` since
// smallvec does not currently support Borsh
//

impl BorshSerialize for Address {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        borsh::BorshSerialize::serialize(&self.prefix, writer)?;
        borsh::BorshSerialize::serialize(&self.version, writer)?;
        // Vectors and slices are all serialized internally the same way
        borsh::BorshSerialize::serialize(&self.payload.as_slice(), writer)?;
        Ok(())
    }
}

impl BorshDeserialize for Address {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let prefix: Prefix = borsh::BorshDeserialize::deserialize_reader(reader)?;
        let version: Version = borsh::BorshDeserialize::deserialize_reader(reader)?;
        let payload: Vec<u8> = borsh::BorshDeserialize::deserialize_reader(reader)?;
        Self::try_new(prefix, version, &payload).map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        Address::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

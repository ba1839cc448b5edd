use crate::Hash;
use sha2::{Digest, Sha256};

pub trait HasherBase {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
}

pub trait Hasher: HasherBase + Clone + Default {
    fn finalize(self) -> Hash;
    fn reset(&mut self);

    /// One-shot application of the hasher over `data`.
    #[inline(always)]
    fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }

    /// `hash(hash(data))` within the same domain.
    #[inline(always)]
    fn double_hash<A: AsRef<[u8]>>(data: A) -> Hash {
        Self::hash(Self::hash(data))
    }
}

macro_rules! blake2b_hasher {
    ($(struct $name:ident => $domain_sep:literal),+ $(,)? ) => {$(
        #[derive(Clone)]
        pub struct $name(blake2b_simd::State);

        impl $name {
            #[inline(always)]
            pub fn new() -> Self {
                Self(blake2b_simd::Params::new().hash_length(32).key($domain_sep).to_state())
            }

            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                self.0.update(data.as_ref());
            }

            #[inline(always)]
            pub fn finalize(self) -> Hash {
                let mut out = [0u8; 32];
                out.copy_from_slice(self.0.finalize().as_bytes());
                Hash(out)
            }
        }

        impl_hasher! { struct $name }
    )*};
}

macro_rules! impl_hasher {
    (struct $name:ident) => {
        impl HasherBase for $name {
            #[inline(always)]
            fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
                self.write(data);
                self
            }
        }

        impl Hasher for $name {
            #[inline(always)]
            fn finalize(self) -> Hash {
                // Resolves to the inherent method
                $name::finalize(self)
            }

            #[inline(always)]
            fn reset(&mut self) {
                *self = Self::new();
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

blake2b_hasher! {
    struct TransactionSigningHash => b"TransactionSigningHash",
    struct TransactionID => b"TransactionID",
    struct PersonalMessageSigningHash => b"PersonalMessageSigningHash",
}

/// SHA-256 of the ASCII string `TransactionSigningHashECDSA`.
pub const ECDSA_SIGNING_DOMAIN_HASH: [u8; 32] = [
    164, 242, 236, 228, 90, 40, 108, 177, 236, 10, 78, 77, 56, 52, 104, 208, 0, 247, 23, 87, 5, 43, 21, 4, 170, 52, 149, 50, 141, 245,
    244, 234,
];

/// SHA-256 hasher pre-seeded with [`ECDSA_SIGNING_DOMAIN_HASH`], so the final digest
/// is `sha256(domain_hash || data)`.
#[derive(Clone)]
pub struct TransactionSigningHashECDSA(Sha256);

impl TransactionSigningHashECDSA {
    #[inline(always)]
    pub fn new() -> Self {
        Self(Sha256::new_with_prefix(ECDSA_SIGNING_DOMAIN_HASH))
    }

    pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
        self.0.update(data.as_ref());
    }

    #[inline(always)]
    pub fn finalize(self) -> Hash {
        Hash(self.0.finalize().into())
    }
}

impl_hasher! { struct TransactionSigningHashECDSA }

/// The only transaction version currently accepted by the network.
pub const TX_VERSION: u16 = 0;

/// The value of the single byte a signature script starts with: `OpData65`
/// pushing a 64-byte signature plus its sighash type.
pub const SIGNATURE_PUSH_LEN: u8 = 65;

/// Length of a raw 64-byte (r || s, or Schnorr) signature.
pub const SIGNATURE_SIZE: usize = 64;

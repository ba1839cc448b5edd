use crate::{Address, AddressError, Prefix, Version};

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const INVALID: u8 = 0xff;
const CHECKSUM_LEN: usize = 8;

const REV_CHARSET: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        table[CHARSET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

const GENERATORS: [u64; 5] = [0x98f2bc8e61, 0x79b76d99e2, 0xf33e5fb3c4, 0xae2eabe2a8, 0x1e4f43e470];

// BCH code over GF(32) with a 40-bit remainder; the accumulator must stay u64.
fn polymod<'data>(values: impl Iterator<Item = &'data u8>) -> u64 {
    let mut c = 1u64;
    for d in values {
        let c0 = c >> 35;
        c = ((c & 0x07_ffff_ffff) << 5) ^ (*d as u64);
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> bit) & 1 != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

fn prefix_u5(prefix: Prefix) -> impl Iterator<Item = u8> {
    prefix.as_str().bytes().map(|c| c & 0x1f)
}

fn checksum(prefix: Prefix, payload_u5: &[u8]) -> u64 {
    let prefix: Vec<u8> = prefix_u5(prefix).collect();
    polymod(prefix.iter().chain(&[0u8]).chain(payload_u5).chain(&[0u8; CHECKSUM_LEN]))
}

fn verify_checksum(prefix: Prefix, data_u5: &[u8]) -> bool {
    let prefix: Vec<u8> = prefix_u5(prefix).collect();
    polymod(prefix.iter().chain(&[0u8]).chain(data_u5)) == 0
}

/// Regroups a stream of `from`-bit values into `to`-bit values, most significant bit first.
///
/// With `pad` the trailing group is right-padded with zeros. Without it, leftover bits
/// must be fewer than `from` and all zero, otherwise the input is rejected.
pub(crate) fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, AddressError> {
    let max_value: u32 = (1 << to) - 1;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &value in data {
        if (value as u32) >> from != 0 {
            return Err(AddressError::InvalidPadding);
        }
        acc = (acc << from) | value as u32;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
        // only the pending bits are needed from here on
        acc &= (1 << bits) - 1;
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || acc != 0 {
        return Err(AddressError::InvalidPadding);
    }
    Ok(out)
}

impl Address {
    pub(crate) fn encode_payload(&self) -> String {
        let mut versioned = Vec::with_capacity(1 + self.payload.len());
        versioned.push(self.version as u8);
        versioned.extend_from_slice(&self.payload);
        let mut data_u5 = convert_bits(&versioned, 8, 5, true).expect("8-bit input always regroups");

        let checksum = checksum(self.prefix, &data_u5);
        data_u5.extend((0..CHECKSUM_LEN).rev().map(|i| ((checksum >> (5 * i)) & 0x1f) as u8));

        data_u5.iter().map(|c| CHARSET[*c as usize] as char).collect()
    }

    pub(crate) fn decode_payload(prefix: Prefix, address: &str) -> Result<Self, AddressError> {
        let data_u5 = address
            .bytes()
            .map(|b| match REV_CHARSET.get(b as usize) {
                Some(&value) if value != INVALID => Ok(value),
                _ => Err(AddressError::DecodingError(b as char)),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        if data_u5.len() <= CHECKSUM_LEN {
            return Err(AddressError::BadPayload);
        }
        if !verify_checksum(prefix, &data_u5) {
            return Err(AddressError::BadChecksum);
        }

        let payload_u5 = &data_u5[..data_u5.len() - CHECKSUM_LEN];
        let payload_u8 = convert_bits(payload_u5, 5, 8, false)?;
        let (&version, payload) = payload_u8.split_first().ok_or(AddressError::BadPayload)?;
        Address::try_new(prefix, Version::try_from(version)?, payload)
    }
}

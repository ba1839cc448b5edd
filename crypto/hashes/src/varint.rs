//! Bitcoin-style compact-size integers used to frame length-prefixed fields.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarIntError {
    #[error("varint input is empty")]
    Empty,

    #[error("varint marker {marker:#04x} needs {needed} bytes, got {available}")]
    Truncated { marker: u8, needed: usize, available: usize },
}

/// Number of bytes `encode_varint(n)` produces.
pub const fn varint_len(n: u64) -> usize {
    if n < 0xfd {
        1
    } else if n <= 0xffff {
        3
    } else if n <= 0xffff_ffff {
        5
    } else {
        9
    }
}

pub fn encode_varint(n: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(varint_len(n));
    match varint_len(n) {
        1 => buf.push(n as u8),
        3 => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        5 => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
    buf
}

/// Decodes a varint from the head of `data`, returning the value and the number
/// of bytes consumed.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize), VarIntError> {
    let marker = *data.first().ok_or(VarIntError::Empty)?;
    let width = match marker {
        0xfd => 2,
        0xfe => 4,
        0xff => 8,
        _ => return Ok((marker as u64, 1)),
    };
    let body = data.get(1..1 + width).ok_or(VarIntError::Truncated { marker, needed: 1 + width, available: data.len() })?;
    let mut le = [0u8; 8];
    le[..width].copy_from_slice(body);
    Ok((u64::from_le_bytes(le), 1 + width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(encode_varint(0), vec![0x00]);
        assert_eq!(encode_varint(0xfc), vec![0xfc]);
        assert_eq!(encode_varint(0xfd), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(encode_varint(0xffff), vec![0xfd, 0xff, 0xff]);
        assert_eq!(encode_varint(0x1_0000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(encode_varint(0xffff_ffff), vec![0xfe, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(encode_varint(0x1_0000_0000), vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_decode() {
        for n in [0u64, 1, 0xfc, 0xfd, 300, 0xffff, 0x1_0000, 0xffff_ffff, 0x1_0000_0000, u64::MAX] {
            let encoded = encode_varint(n);
            assert_eq!(encoded.len(), varint_len(n));
            assert_eq!(decode_varint(&encoded), Ok((n, encoded.len())));
        }
        // trailing bytes are left to the caller
        assert_eq!(decode_varint(&[0x05, 0xaa, 0xbb]), Ok((5, 1)));
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_varint(&[]), Err(VarIntError::Empty));
        assert_eq!(decode_varint(&[0xfe, 0x01]), Err(VarIntError::Truncated { marker: 0xfe, needed: 5, available: 2 }));
    }
}

//! Fixed-width integer codec and zero padding.
//!
//! Amounts arrive as arbitrary-precision [`U256`] values (configuration and
//! the Ethereum side both speak uint256), but SPL token instructions carry a
//! little-endian u64. [`encode_u64`] is the single guarded narrowing point.

use alloy_primitives::U256;

use crate::error::SolError;

/// Width of a serialized u64.
pub const U64_WIDTH: usize = 8;

/// Serialize `value` as 8 little-endian bytes.
///
/// The minimal big-endian representation is reversed and zero-padded at the
/// high-order end. Fails if the value needs more than 8 bytes.
pub fn encode_u64(value: U256) -> Result<[u8; U64_WIDTH], SolError> {
    let minimal = value.to_be_bytes_trimmed_vec();
    if minimal.len() > U64_WIDTH {
        return Err(SolError::IntegerOverflow(format!(
            "{value} needs {} bytes, u64 holds {U64_WIDTH}",
            minimal.len()
        )));
    }

    let mut out = [0u8; U64_WIDTH];
    for (slot, byte) in out.iter_mut().zip(minimal.iter().rev()) {
        *slot = *byte;
    }
    Ok(out)
}

/// Deserialize 8 little-endian bytes back into a [`U256`].
pub fn decode_u64(bytes: [u8; U64_WIDTH]) -> U256 {
    U256::from(u64::from_le_bytes(bytes))
}

/// Narrow a [`U256`] to a native `u64`, with the same guard as [`encode_u64`].
pub fn to_u64(value: U256) -> Result<u64, SolError> {
    encode_u64(value).map(u64::from_le_bytes)
}

/// Copy `bytes` into the tail of a zero-filled `N`-byte buffer.
///
/// Leading bytes stay zero, so short addresses end up right-aligned the way
/// a 32-byte address field expects. Input longer than `N` is rejected rather
/// than truncated.
pub fn pad_left<const N: usize>(bytes: &[u8]) -> Result<[u8; N], SolError> {
    if bytes.len() > N {
        return Err(SolError::PaddingOverflow {
            len: bytes.len(),
            width: N,
        });
    }

    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn encode_zero() {
        assert_eq!(encode_u64(U256::ZERO).unwrap(), [0u8; 8]);
    }

    #[test]
    fn encode_is_little_endian() {
        let encoded = encode_u64(U256::from(1000u64)).unwrap();
        // 1000 = 0x03e8
        assert_eq!(encoded, [0xe8, 0x03, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn encode_u64_max() {
        let encoded = encode_u64(U256::from(u64::MAX)).unwrap();
        assert_eq!(encoded, [0xff; 8]);
    }

    #[test]
    fn encode_rejects_nine_byte_values() {
        let too_big = U256::from(u64::MAX) + U256::from(1u64);
        let err = encode_u64(too_big).unwrap_err();
        assert!(matches!(err, SolError::IntegerOverflow(_)));
    }

    #[test]
    fn decode_reverses_encode() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let value = U256::from(rng.gen::<u64>());
            assert_eq!(decode_u64(encode_u64(value).unwrap()), value);
        }
        for edge in [0u64, 1, 255, 256, u32::MAX as u64, u64::MAX] {
            let value = U256::from(edge);
            assert_eq!(decode_u64(encode_u64(value).unwrap()), value);
        }
    }

    #[test]
    fn to_u64_narrows() {
        assert_eq!(to_u64(U256::from(100_000_000u64)).unwrap(), 100_000_000);
        assert!(to_u64(U256::MAX).is_err());
    }

    #[test]
    fn pad_left_right_aligns_input() {
        let padded: [u8; 32] = pad_left(&[0xaa; 20]).unwrap();
        assert_eq!(&padded[..12], &[0u8; 12]);
        assert_eq!(&padded[12..], &[0xaa; 20]);
    }

    #[test]
    fn pad_left_exact_width() {
        let padded: [u8; 4] = pad_left(&[1, 2, 3, 4]).unwrap();
        assert_eq!(padded, [1, 2, 3, 4]);
    }

    #[test]
    fn pad_left_empty_input_is_all_zero() {
        let padded: [u8; 32] = pad_left(&[]).unwrap();
        assert_eq!(padded, [0u8; 32]);
    }

    #[test]
    fn pad_left_rejects_oversized_input() {
        let result = pad_left::<32>(&[1u8; 33]);
        assert!(matches!(
            result,
            Err(SolError::PaddingOverflow { len: 33, width: 32 })
        ));
    }
}

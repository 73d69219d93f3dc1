//! Minimal ABI encoding for EVM function calls.
//!
//! Only static types are supported: every parameter encodes to exactly one
//! 32-byte word, which covers the ERC-20 and bridge calls this crate makes.

use alloy_primitives::{Address, U256};
use sha3::{Digest, Keccak256};

/// A single ABI-encoded parameter.
#[derive(Debug, Clone)]
pub enum AbiParam {
    /// A 20-byte address, left-padded to 32 bytes.
    Address(Address),
    /// A 256-bit unsigned integer, big-endian.
    Uint256(U256),
    /// A `uint8`, left-padded.
    Uint8(u8),
    /// A `uint32`, left-padded.
    Uint32(u32),
    /// A `bytes32`, verbatim.
    FixedBytes32([u8; 32]),
}

/// Computes the 4-byte selector of a canonical function signature such as
/// `approve(address,uint256)`.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Encodes a function call with the given 4-byte selector and ABI parameters.
///
/// The output is `selector || encode(params[0]) || encode(params[1]) || ...`.
pub fn encode_function_call(selector: [u8; 4], params: &[AbiParam]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + params.len() * 32);
    data.extend_from_slice(&selector);

    for param in params {
        data.extend_from_slice(&encode_param(param));
    }

    data
}

fn encode_param(param: &AbiParam) -> [u8; 32] {
    let mut word = [0u8; 32];
    match param {
        AbiParam::Address(addr) => word[12..].copy_from_slice(addr.as_slice()),
        AbiParam::Uint256(value) => word = value.to_be_bytes::<32>(),
        AbiParam::Uint8(value) => word[31] = *value,
        AbiParam::Uint32(value) => word[28..].copy_from_slice(&value.to_be_bytes()),
        AbiParam::FixedBytes32(bytes) => word = *bytes,
    }
    word
}

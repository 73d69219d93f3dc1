use alloy_primitives::{Address, U256};

use crate::abi::{encode_function_call, function_selector, AbiParam};

pub const APPROVE_SIGNATURE: &str = "approve(address,uint256)";

/// Encodes an ERC-20 `approve(address,uint256)` call letting `spender` pull
/// up to `amount` tokens.
pub fn encode_approve(spender: Address, amount: U256) -> Vec<u8> {
    let params = [AbiParam::Address(spender), AbiParam::Uint256(amount)];
    encode_function_call(function_selector(APPROVE_SIGNATURE), &params)
}

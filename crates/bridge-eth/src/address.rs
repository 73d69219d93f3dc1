use alloy_primitives::{Address, U256};

use crate::error::EthError;

/// Parses a 0x-prefixed hex address.
///
/// All-lowercase and all-uppercase input is accepted as is; mixed case must
/// carry a valid EIP-55 checksum.
pub fn parse_address(address: &str) -> Result<Address, EthError> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))?;

    if hex_part.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }

    let bytes = hex::decode(hex_part)
        .map_err(|e| EthError::InvalidAddress(format!("invalid hex: {e}")))?;
    let parsed = Address::from_slice(&bytes);

    let is_all_lower = hex_part.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = hex_part.chars().all(|c| !c.is_ascii_lowercase());
    if !(is_all_lower || is_all_upper) && parsed.to_checksum(None)[2..] != *hex_part {
        return Err(EthError::InvalidAddress(format!(
            "EIP-55 checksum mismatch for {address}"
        )));
    }

    Ok(parsed)
}

/// Parses a decimal token amount into a uint256.
pub fn parse_amount(amount: &str) -> Result<U256, EthError> {
    U256::from_str_radix(amount.trim(), 10)
        .map_err(|e| EthError::InvalidAmount(format!("{amount:?}: {e}")))
}

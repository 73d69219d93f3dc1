//! Ethereum-side encoding for the token bridge.
//!
//! This crate provides:
//! - 0x-hex address parsing with EIP-55 checksum checks
//! - Minimal static ABI encoding and Keccak-256 function selectors
//! - ERC-20 `approve` calldata, so the bridge may pull the locked tokens
//! - Bridge `lockAssets` calldata

pub mod abi;
pub mod address;
pub mod bridge;
pub mod erc20;
pub mod error;

pub use address::{parse_address, parse_amount};
pub use bridge::LockAssetsCall;
pub use erc20::encode_approve;
pub use error::EthError;

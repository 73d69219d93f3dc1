//! Calls into the Ethereum-side bridge contract.

use alloy_primitives::{Address, U256};

use crate::abi::{encode_function_call, function_selector, AbiParam};

pub const LOCK_ASSETS_SIGNATURE: &str = "lockAssets(address,uint256,bytes32,uint8,uint32)";

/// Arguments of `lockAssets`: escrow `amount` of `asset` and emit a transfer
/// to `recipient` on `target_chain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockAssetsCall {
    pub asset: Address,
    pub amount: U256,
    /// Recipient account on the target chain, e.g. a Solana token account.
    pub recipient: [u8; 32],
    pub target_chain: u8,
    pub nonce: u32,
}

impl LockAssetsCall {
    pub fn encode(&self) -> Vec<u8> {
        let params = [
            AbiParam::Address(self.asset),
            AbiParam::Uint256(self.amount),
            AbiParam::FixedBytes32(self.recipient),
            AbiParam::Uint8(self.target_chain),
            AbiParam::Uint32(self.nonce),
        ];
        encode_function_call(function_selector(LOCK_ASSETS_SIGNATURE), &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::parse_address;

    fn sample_call() -> LockAssetsCall {
        LockAssetsCall {
            asset: parse_address("0x18aAA7115705e8be94bfFEBDE57Af9BFc265B998").unwrap(),
            amount: U256::from(100_000_000u64),
            recipient: [0xab; 32],
            target_chain: 1,
            nonce: 123,
        }
    }

    #[test]
    fn lock_assets_selector() {
        let data = sample_call().encode();
        assert_eq!(hex::encode(&data[..4]), "13cca1a9");
    }

    #[test]
    fn lock_assets_layout() {
        let data = sample_call().encode();

        assert_eq!(data.len(), 4 + 5 * 32);
        assert_eq!(
            hex::encode(&data[16..36]),
            "18aaa7115705e8be94bffebde57af9bfc265b998"
        );
        assert!(hex::encode(&data[36..68]).ends_with("05f5e100"));
        assert_eq!(&data[68..100], &[0xab; 32]);
        assert_eq!(data[131], 1);
        assert_eq!(&data[132..160], &[0u8; 28]);
        assert_eq!(&data[160..164], &123u32.to_be_bytes());
    }
}

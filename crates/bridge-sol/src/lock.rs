//! The bridge's lock (transfer-out) instruction.
//!
//! ```text
//! offset  width  field
//!      0      1  instruction      (1 = TransferOut)
//!      1     32  amount           big-endian, left-zero-padded
//!     33      1  target_chain
//!     34     32  asset_address    left-zero-padded
//!     66      1  asset_chain
//!     67      1  asset_decimals
//!     68     32  target_address   left-zero-padded
//!    100      1  (padding)
//!    101      4  nonce            u32 LE
//! ```
//!
//! Locking also creates a transfer-out proposal account at a PDA of the
//! bridge program. Its seeds are part of the on-chain protocol; any
//! deviation derives an address the bridge never writes to.

use alloy_primitives::U256;

use crate::codec::{encode_u64, pad_left};
use crate::error::SolError;
use crate::instruction::{
    build_spl_approve, build_system_transfer, SolAccountMeta, SolInstruction, SYSTEM_PROGRAM_ID,
    SYSVAR_CLOCK_ID, SYSVAR_INSTRUCTIONS_ID, SYSVAR_RENT_ID, TOKEN_PROGRAM_ID,
};
use crate::layout::{Field, FieldKind, Layout};
use crate::pda::find_program_address;

/// Instruction tag of the bridge's TransferOut (lock) instruction.
pub const TRANSFER_OUT_TAG: u8 = 1;

/// First seed of every transfer-out proposal PDA.
pub const TRANSFER_SEED: &[u8] = b"transfer";

/// Encoded length of [`LOCK_ASSET_LAYOUT`].
pub const LOCK_ASSET_DATA_LEN: usize = 105;

pub static LOCK_ASSET_LAYOUT: Layout = Layout {
    name: "LockAsset",
    fields: &[
        Field::new("instruction", FieldKind::U8),
        Field::new("amount", FieldKind::Blob(32)),
        Field::new("target_chain", FieldKind::U8),
        Field::new("asset_address", FieldKind::Blob(32)),
        Field::new("asset_chain", FieldKind::U8),
        Field::new("asset_decimals", FieldKind::U8),
        Field::new("target_address", FieldKind::Blob(32)),
        Field::new("_align", FieldKind::Padding(1)),
        Field::new("nonce", FieldKind::U32),
    ],
};

/// Decoded arguments of a lock instruction, all fields at their wire width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockAssetData {
    pub amount: [u8; 32],
    pub target_chain: u8,
    pub asset_address: [u8; 32],
    pub asset_chain: u8,
    pub asset_decimals: u8,
    pub target_address: [u8; 32],
    pub nonce: u32,
}

impl LockAssetData {
    pub fn encode(&self) -> Result<Vec<u8>, SolError> {
        LOCK_ASSET_LAYOUT
            .writer()
            .u8("instruction", TRANSFER_OUT_TAG)?
            .blob("amount", &self.amount)?
            .u8("target_chain", self.target_chain)?
            .blob("asset_address", &self.asset_address)?
            .u8("asset_chain", self.asset_chain)?
            .u8("asset_decimals", self.asset_decimals)?
            .blob("target_address", &self.target_address)?
            .u32("nonce", self.nonce)?
            .finish()
    }

    pub fn decode(data: &[u8]) -> Result<Self, SolError> {
        let mut reader = LOCK_ASSET_LAYOUT.reader(data)?;
        let tag = reader.u8("instruction")?;
        if tag != TRANSFER_OUT_TAG {
            return Err(SolError::Layout(format!(
                "LockAsset: instruction tag {tag}, expected {TRANSFER_OUT_TAG}"
            )));
        }
        Ok(Self {
            amount: reader.blob("amount")?,
            target_chain: reader.u8("target_chain")?,
            asset_address: reader.blob("asset_address")?,
            asset_chain: reader.u8("asset_chain")?,
            asset_decimals: reader.u8("asset_decimals")?,
            target_address: reader.blob("target_address")?,
            nonce: reader.u32("nonce")?,
        })
    }

    /// The amount as an integer.
    pub fn amount(&self) -> U256 {
        U256::from_be_bytes(self.amount)
    }
}

/// Semantic inputs of a lock, before padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockParams {
    /// Token base units. Must fit a u64, the SPL token amount width.
    pub amount: U256,
    pub target_chain: u8,
    /// Asset address on its home chain, at most 32 bytes (20 for EVM).
    pub asset_address: Vec<u8>,
    pub asset_chain: u8,
    pub asset_decimals: u8,
    /// Recipient on the target chain, at most 32 bytes.
    pub target_address: Vec<u8>,
    pub nonce: u32,
}

impl LockParams {
    /// Pad and range-check every field into its wire form.
    pub fn to_asset_data(&self) -> Result<LockAssetData, SolError> {
        // Reject oversized amounts before anything is built.
        encode_u64(self.amount)?;

        Ok(LockAssetData {
            amount: self.amount.to_be_bytes::<32>(),
            target_chain: self.target_chain,
            asset_address: pad_left(&self.asset_address)?,
            asset_chain: self.asset_chain,
            asset_decimals: self.asset_decimals,
            target_address: pad_left(&self.target_address)?,
            nonce: self.nonce,
        })
    }
}

/// Accounts a Solana-side lock touches besides the fixed programs and sysvars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeAccounts {
    pub bridge_program: [u8; 32],
    /// The bridge's config account, which also acts as the token delegate.
    pub delegate: [u8; 32],
    pub token_mint: [u8; 32],
    pub source_token_account: [u8; 32],
    pub owner: [u8; 32],
}

/// A built lock instruction and the proposal account it will create.
#[derive(Debug, Clone)]
pub struct LockInstruction {
    pub instruction: SolInstruction,
    pub transfer_key: [u8; 32],
    pub transfer_bump: u8,
}

/// Derive the transfer-out proposal address for a lock.
///
/// Seeds, in order: `"transfer"`, delegate, asset chain, padded asset
/// address, target chain, padded target address, source token account,
/// nonce as u32 LE.
pub fn derive_transfer_address(
    accounts: &BridgeAccounts,
    data: &LockAssetData,
) -> Result<([u8; 32], u8), SolError> {
    let nonce = data.nonce.to_le_bytes();
    let seeds: [&[u8]; 8] = [
        TRANSFER_SEED,
        &accounts.delegate,
        &[data.asset_chain],
        &data.asset_address,
        &[data.target_chain],
        &data.target_address,
        &accounts.source_token_account,
        &nonce,
    ];
    find_program_address(&seeds, &accounts.bridge_program)
}

/// Build the bridge lock instruction.
///
/// Pure computation; the caller submits it.
pub fn build_lock_instruction(
    accounts: &BridgeAccounts,
    params: &LockParams,
) -> Result<LockInstruction, SolError> {
    let asset_data = params.to_asset_data()?;
    let data = asset_data.encode()?;
    let (transfer_key, transfer_bump) = derive_transfer_address(accounts, &asset_data)?;

    let instruction = SolInstruction {
        program_id: accounts.bridge_program,
        accounts: vec![
            SolAccountMeta::readonly(accounts.bridge_program),
            SolAccountMeta::readonly(SYSTEM_PROGRAM_ID),
            SolAccountMeta::readonly(TOKEN_PROGRAM_ID),
            SolAccountMeta::readonly(SYSVAR_RENT_ID),
            SolAccountMeta::readonly(SYSVAR_CLOCK_ID),
            SolAccountMeta::readonly(SYSVAR_INSTRUCTIONS_ID),
            SolAccountMeta::writable(accounts.source_token_account),
            SolAccountMeta::readonly(accounts.delegate),
            SolAccountMeta::writable(transfer_key),
            SolAccountMeta::writable(accounts.token_mint),
            SolAccountMeta::writable_signer(accounts.owner),
        ],
        data,
    };

    Ok(LockInstruction {
        instruction,
        transfer_key,
        transfer_bump,
    })
}

/// Everything a Solana-side lock transaction carries, in submission order:
/// approve the delegate, pay the bridge fee, lock.
#[derive(Debug, Clone)]
pub struct LockBundle {
    pub instructions: Vec<SolInstruction>,
    pub transfer_key: [u8; 32],
}

pub fn build_lock_bundle(
    accounts: &BridgeAccounts,
    params: &LockParams,
    fee_lamports: u64,
) -> Result<LockBundle, SolError> {
    let approve = build_spl_approve(
        &accounts.source_token_account,
        &accounts.delegate,
        &accounts.owner,
        params.amount,
    )?;
    let fee = build_system_transfer(&accounts.owner, &accounts.delegate, fee_lamports)?;
    let lock = build_lock_instruction(accounts, params)?;

    Ok(LockBundle {
        instructions: vec![approve, fee, lock.instruction],
        transfer_key: lock.transfer_key,
    })
}

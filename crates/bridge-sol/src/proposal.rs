//! The on-chain transfer-out proposal account.
//!
//! Written by the bridge program when a lock lands and updated as guardians
//! attest to it. This crate only ever decodes it.

use crate::address::bytes_to_address;
use crate::error::SolError;
use crate::layout::{Field, FieldKind, Layout};

/// Capacity of the attestation (VAA) buffer inside the proposal.
pub const VAA_CAPACITY: usize = 1001;

/// Encoded length of [`TRANSFER_OUT_PROPOSAL_LAYOUT`].
pub const TRANSFER_OUT_PROPOSAL_LEN: usize = 1184;

// Padding fields keep the following u32 fields 4-byte aligned.
pub static TRANSFER_OUT_PROPOSAL_LAYOUT: Layout = Layout {
    name: "TransferOutProposal",
    fields: &[
        Field::new("amount", FieldKind::Blob(32)),
        Field::new("to_chain", FieldKind::U8),
        Field::new("source_address", FieldKind::PublicKey),
        Field::new("target_address", FieldKind::Blob(32)),
        Field::new("asset_address", FieldKind::Blob(32)),
        Field::new("asset_chain", FieldKind::U8),
        Field::new("asset_decimals", FieldKind::U8),
        Field::new("_align_nonce", FieldKind::Padding(1)),
        Field::new("nonce", FieldKind::U32),
        Field::new("vaa", FieldKind::Blob(VAA_CAPACITY)),
        Field::new("_align_vaa_time", FieldKind::Padding(3)),
        Field::new("vaa_time", FieldKind::U32),
        Field::new("lockup_time", FieldKind::U32),
        Field::new("poke_counter", FieldKind::U8),
        Field::new("signature_account", FieldKind::PublicKey),
        Field::new("initialized", FieldKind::U8),
        Field::new("_tail", FieldKind::Padding(2)),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutProposal {
    pub amount: [u8; 32],
    pub to_chain: u8,
    pub source_address: [u8; 32],
    pub target_address: [u8; 32],
    pub asset_address: [u8; 32],
    pub asset_chain: u8,
    pub asset_decimals: u8,
    pub nonce: u32,
    /// Attestation bytes written so far; logical length varies, allocation
    /// is always [`VAA_CAPACITY`].
    pub vaa: Vec<u8>,
    pub vaa_time: u32,
    pub lockup_time: u32,
    pub poke_counter: u8,
    /// Account collecting guardian signatures for this proposal.
    pub signature_account: [u8; 32],
    pub initialized: bool,
}

impl TransferOutProposal {
    /// Decode raw account data. Short buffers are a protocol error.
    pub fn decode(data: &[u8]) -> Result<Self, SolError> {
        let mut reader = TRANSFER_OUT_PROPOSAL_LAYOUT.reader(data)?;
        Ok(Self {
            amount: reader.blob("amount")?,
            to_chain: reader.u8("to_chain")?,
            source_address: reader.public_key("source_address")?,
            target_address: reader.blob("target_address")?,
            asset_address: reader.blob("asset_address")?,
            asset_chain: reader.u8("asset_chain")?,
            asset_decimals: reader.u8("asset_decimals")?,
            nonce: reader.u32("nonce")?,
            vaa: reader.blob_vec("vaa", VAA_CAPACITY)?,
            vaa_time: reader.u32("vaa_time")?,
            lockup_time: reader.u32("lockup_time")?,
            poke_counter: reader.u8("poke_counter")?,
            signature_account: reader.public_key("signature_account")?,
            initialized: reader.u8("initialized")? != 0,
        })
    }

    /// Base58 of the Solana account the tokens were locked from. The target
    /// and asset addresses belong to foreign chains and stay raw.
    pub fn source_account_address(&self) -> String {
        bytes_to_address(&self.source_address)
    }

    pub fn signature_account_address(&self) -> String {
        bytes_to_address(&self.signature_account)
    }
}

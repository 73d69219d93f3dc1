//! Instruction types and the stock-program instructions a lock needs.
//!
//! Besides the bridge's own lock instruction (see [`crate::lock`]), a
//! Solana-side transfer carries an SPL Token `Approve` so the bridge delegate
//! may move the tokens, and a System Program `Transfer` paying the bridge fee.

use alloy_primitives::U256;

use crate::codec::encode_u64;
use crate::error::SolError;

// ---------------------------------------------------------------------------
// Well-known program and sysvar ids
// ---------------------------------------------------------------------------

/// The Solana System Program public key: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// SPL Token Program ID: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
];

/// Rent sysvar: `SysvarRent111111111111111111111111111111111`
pub const SYSVAR_RENT_ID: [u8; 32] = [
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a, 0xf1,
    0x7f, 0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a, 0x00, 0x00,
    0x00, 0x00,
];

/// Clock sysvar: `SysvarC1ock11111111111111111111111111111111`
pub const SYSVAR_CLOCK_ID: [u8; 32] = [
    0x06, 0xa7, 0xd5, 0x17, 0x18, 0xc7, 0x74, 0xc9, 0x28, 0x56, 0x63, 0x98, 0x69, 0x1d, 0x5e,
    0xb6, 0x8b, 0x5e, 0xb8, 0xa3, 0x9b, 0x4b, 0x6d, 0x5c, 0x73, 0x55, 0x5b, 0x21, 0x00, 0x00,
    0x00, 0x00,
];

/// Instructions sysvar: `Sysvar1nstructions1111111111111111111111111`
pub const SYSVAR_INSTRUCTIONS_ID: [u8; 32] = [
    0x06, 0xa7, 0xd5, 0x17, 0x18, 0x7b, 0xd1, 0x66, 0x35, 0xda, 0xd4, 0x04, 0x55, 0xfd, 0xc2,
    0xc0, 0xc1, 0x24, 0xc6, 0x8f, 0x21, 0x56, 0x75, 0xa5, 0xdb, 0xba, 0xcb, 0x5f, 0x08, 0x00,
    0x00, 0x00,
];

/// System Program `Transfer` instruction index (little-endian u32).
const SYSTEM_TRANSFER_IX_INDEX: u32 = 2;

/// SPL Token `Approve` instruction index.
const SPL_APPROVE_IX_INDEX: u8 = 4;

/// Account size the bridge fee is computed against: two proposal-sized
/// accounts of 40 header bytes plus 1340 bytes of body each.
pub const TRANSFER_FEE_ACCOUNT_SIZE: usize = (40 + 1340) * 2;

/// Flat part of the bridge fee, in lamports.
pub const TRANSFER_FEE_FLAT_LAMPORTS: u64 = 18 * 10_000 * 2;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// A single account reference in a Solana instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolAccountMeta {
    pub pubkey: [u8; 32],
    pub is_signer: bool,
    pub is_writable: bool,
}

impl SolAccountMeta {
    pub fn readonly(pubkey: [u8; 32]) -> Self {
        Self {
            pubkey,
            is_signer: false,
            is_writable: false,
        }
    }

    pub fn writable(pubkey: [u8; 32]) -> Self {
        Self {
            pubkey,
            is_signer: false,
            is_writable: true,
        }
    }

    pub fn writable_signer(pubkey: [u8; 32]) -> Self {
        Self {
            pubkey,
            is_signer: true,
            is_writable: true,
        }
    }
}

/// A Solana instruction, ready to be handed to a transaction builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolInstruction {
    pub program_id: [u8; 32],
    pub accounts: Vec<SolAccountMeta>,
    pub data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Stock instructions
// ---------------------------------------------------------------------------

/// Build an SPL Token `Approve` instruction letting `delegate` move up to
/// `amount` base units out of `source`.
///
/// # Wire format
///
/// Instruction index 4, followed by the amount as u64 LE. Total data: 9 bytes.
/// Amounts that do not fit a u64 are rejected.
pub fn build_spl_approve(
    source: &[u8; 32],
    delegate: &[u8; 32],
    owner: &[u8; 32],
    amount: U256,
) -> Result<SolInstruction, SolError> {
    let mut data = Vec::with_capacity(9);
    data.push(SPL_APPROVE_IX_INDEX);
    data.extend_from_slice(&encode_u64(amount)?);

    Ok(SolInstruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta::writable(*source),
            SolAccountMeta::readonly(*delegate),
            SolAccountMeta {
                pubkey: *owner,
                is_signer: true,
                is_writable: false,
            },
        ],
        data,
    })
}

/// Build a System Program `Transfer` instruction.
pub fn build_system_transfer(
    from: &[u8; 32],
    to: &[u8; 32],
    lamports: u64,
) -> Result<SolInstruction, SolError> {
    if lamports == 0 {
        return Err(SolError::TransactionBuildError(
            "lamports must be > 0".into(),
        ));
    }

    // Instruction data: u32 LE instruction index (2 = Transfer) + u64 LE lamports.
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&SYSTEM_TRANSFER_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Ok(SolInstruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta::writable_signer(*from),
            SolAccountMeta::writable(*to),
        ],
        data,
    })
}

/// Bridge fee in lamports, given the ledger's rent-exempt minimum for
/// [`TRANSFER_FEE_ACCOUNT_SIZE`] bytes.
pub fn bridge_transfer_fee(rent_exemption_lamports: u64) -> Result<u64, SolError> {
    rent_exemption_lamports
        .checked_add(TRANSFER_FEE_FLAT_LAMPORTS)
        .ok_or_else(|| SolError::IntegerOverflow("bridge transfer fee exceeds u64".into()))
}

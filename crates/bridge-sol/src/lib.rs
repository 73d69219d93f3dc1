//! Solana-side encoding for the token bridge.
//!
//! This crate builds the bridge's lock instruction, derives the transfer-out
//! proposal address, and decodes the accounts the bridge writes back. It is
//! pure byte manipulation, without pulling in `solana-sdk`. Submitting
//! transactions and reading accounts is left to the caller.

pub mod address;
pub mod attestation;
pub mod codec;
pub mod error;
pub mod instruction;
pub mod layout;
pub mod lock;
pub mod pda;
pub mod proposal;
pub mod signatures;

// Re-export key public types for ergonomic imports.
pub use address::{address_to_bytes, bytes_to_address};
pub use attestation::{extract_attestation_prefix, pack_signatures, splice_signatures};
pub use codec::{decode_u64, encode_u64, pad_left, to_u64};
pub use error::SolError;
pub use instruction::{
    bridge_transfer_fee, build_spl_approve, build_system_transfer, SolAccountMeta,
    SolInstruction, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID, TRANSFER_FEE_ACCOUNT_SIZE,
};
pub use lock::{
    build_lock_bundle, build_lock_instruction, derive_transfer_address, BridgeAccounts,
    LockAssetData, LockBundle, LockInstruction, LockParams,
};
pub use pda::{create_program_address, find_program_address};
pub use proposal::TransferOutProposal;
pub use signatures::{parse_signature_slots, SignatureSlot};

//! Guardian signature-status account.
//!
//! The account is a flat array of [`SIGNATURE_SLOTS`] slots of
//! [`SIGNATURE_LEN`] bytes, one per guardian index. A slot is empty while all
//! of its bytes are zero.

use crate::error::SolError;

pub const SIGNATURE_SLOTS: usize = 20;

/// secp256k1 recoverable signature: r (32) || s (32) || v (1).
pub const SIGNATURE_LEN: usize = 65;

/// Bytes covered by the slot array.
pub const SIGNATURE_STATUS_LEN: usize = SIGNATURE_SLOTS * SIGNATURE_LEN;

/// One filled slot of the signature-status account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSlot {
    /// Guardian index, in `0..SIGNATURE_SLOTS`.
    pub index: u8,
    pub signature: [u8; SIGNATURE_LEN],
}

/// Split raw signature-status account data into its non-empty slots, in
/// ascending slot order.
pub fn parse_signature_slots(data: &[u8]) -> Result<Vec<SignatureSlot>, SolError> {
    if data.len() < SIGNATURE_STATUS_LEN {
        return Err(SolError::Layout(format!(
            "SignatureStatus: expected at least {SIGNATURE_STATUS_LEN} bytes, got {}",
            data.len()
        )));
    }

    let slots = data[..SIGNATURE_STATUS_LEN]
        .chunks_exact(SIGNATURE_LEN)
        .zip(0u8..)
        .filter(|(chunk, _)| chunk.iter().any(|b| *b != 0))
        .map(|(chunk, index)| {
            let mut signature = [0u8; SIGNATURE_LEN];
            signature.copy_from_slice(chunk);
            SignatureSlot { index, signature }
        })
        .collect();

    Ok(slots)
}

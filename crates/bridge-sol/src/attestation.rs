//! Attestation (VAA) assembly from a transfer-out proposal.
//!
//! The bridge writes the attestation body into the proposal's fixed VAA
//! buffer, terminated by a `0xFF` sentinel, while guardian signatures land in
//! a separate signature-status account. A usable attestation is the body
//! with the signatures spliced in:
//!
//! ```text
//! prefix[0..5] || count || (index || signature)* || prefix[6..]
//! ```
//!
//! Byte 5 of the prefix is the reserved signature-count slot and is replaced.

use crate::error::SolError;
use crate::signatures::{SignatureSlot, SIGNATURE_LEN};

/// Terminator the bridge writes after the attestation body.
pub const VAA_SENTINEL: u8 = 0xff;

/// Offset of the signature-count byte.
pub const SIGNATURE_COUNT_OFFSET: usize = 5;

/// Offset where the body after the signature section starts.
pub const BODY_OFFSET: usize = SIGNATURE_COUNT_OFFSET + 1;

/// Cut the VAA buffer at its last sentinel byte.
///
/// Scans backwards for the highest index `i >= 1` holding [`VAA_SENTINEL`]
/// and keeps `vaa[..i]`; without a sentinel the whole buffer is kept.
/// Returns `None` while the kept bytes are all zero, i.e. the bridge has not
/// written an attestation yet.
pub fn extract_attestation_prefix(vaa: &[u8]) -> Option<&[u8]> {
    let end = (1..vaa.len())
        .rev()
        .find(|&i| vaa[i] == VAA_SENTINEL)
        .unwrap_or(vaa.len());
    let prefix = &vaa[..end];

    if prefix.iter().all(|b| *b == 0) {
        return None;
    }
    Some(prefix)
}

/// Concatenate `index || signature` for each slot, in the given order.
pub fn pack_signatures(slots: &[SignatureSlot]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(slots.len() * (1 + SIGNATURE_LEN));
    for slot in slots {
        packed.push(slot.index);
        packed.extend_from_slice(&slot.signature);
    }
    packed
}

/// Splice signatures into an attestation prefix, producing the final VAA.
pub fn splice_signatures(prefix: &[u8], slots: &[SignatureSlot]) -> Result<Vec<u8>, SolError> {
    if prefix.len() < BODY_OFFSET {
        return Err(SolError::MalformedAttestation(format!(
            "prefix is {} bytes, need at least {BODY_OFFSET}",
            prefix.len()
        )));
    }
    let count = u8::try_from(slots.len()).map_err(|_| {
        SolError::MalformedAttestation(format!("{} signatures exceed a u8 count", slots.len()))
    })?;

    let packed = pack_signatures(slots);
    let mut vaa = Vec::with_capacity(prefix.len() + packed.len());
    vaa.extend_from_slice(&prefix[..SIGNATURE_COUNT_OFFSET]);
    vaa.push(count);
    vaa.extend_from_slice(&packed);
    vaa.extend_from_slice(&prefix[BODY_OFFSET..]);
    Ok(vaa)
}

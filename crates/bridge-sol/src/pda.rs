//! Program Derived Address (PDA) derivation.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || bump || program_id ||
//! "ProgramDerivedAddress")` for the highest bump seed (255 down to 0) whose
//! hash is NOT a valid Ed25519 point, so no private key can exist for it.

use sha2::{Digest, Sha256};

use crate::error::SolError;

/// The string appended to PDA derivation: "ProgramDerivedAddress".
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, the bump seed included.
pub const MAX_SEEDS: usize = 16;

/// Find a valid PDA for the given seeds and program.
///
/// Returns the address together with the bump seed that produced it. Same
/// seeds in the same order always give the same result.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<([u8; 32], u8), SolError> {
    // Room for the bump seed.
    check_seeds(seeds, MAX_SEEDS - 1)?;

    for bump in (0u8..=255).rev() {
        if let Some(address) = try_create_program_address(seeds, &[bump], program_id) {
            return Ok((address, bump));
        }
    }

    Err(SolError::PdaNotFound)
}

/// Create a PDA from seeds that already include the bump seed.
///
/// Fails with [`SolError::PdaNotFound`] if the hash lands on the curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<[u8; 32], SolError> {
    check_seeds(seeds, MAX_SEEDS)?;
    try_create_program_address(seeds, &[], program_id).ok_or(SolError::PdaNotFound)
}

fn check_seeds(seeds: &[&[u8]], max_seeds: usize) -> Result<(), SolError> {
    if seeds.len() > max_seeds {
        return Err(SolError::InvalidSeeds(format!(
            "{} seeds, at most {max_seeds} allowed",
            seeds.len()
        )));
    }
    if let Some((i, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(SolError::InvalidSeeds(format!(
            "seed {i} is {} bytes, at most {MAX_SEED_LEN} allowed",
            seed.len()
        )));
    }
    Ok(())
}

/// Returns `Some(address)` if the derived point is OFF the Ed25519 curve,
/// `None` if it falls on the curve.
fn try_create_program_address(
    seeds: &[&[u8]],
    bump_seed: &[u8],
    program_id: &[u8; 32],
) -> Option<[u8; 32]> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(bump_seed);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return None;
    }

    Some(hash)
}

/// Check if 32 bytes decompress to a valid Ed25519 curve point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}

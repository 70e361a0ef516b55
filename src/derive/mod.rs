use solana_program::{hash::hashv, pubkey::Pubkey};

pub mod errors;
pub use errors::DeriveError;

use crate::constants::{METADATA_PREFIX, PDA_MARKER};

/// Searches bumps from 255 down to 0 and returns the first candidate that
/// lies off the ed25519 curve, together with its bump.
pub fn derive_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DeriveError> {
    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];

        let mut input: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 3);
        input.extend_from_slice(seeds);
        input.push(&bump_seed);
        input.push(program_id.as_ref());
        input.push(PDA_MARKER);

        let candidate = Pubkey::new_from_array(hashv(&input).to_bytes());
        if !candidate.is_on_curve() {
            return Ok((candidate, bump));
        }
    }

    Err(DeriveError::Exhausted {
        program_id: *program_id,
    })
}

pub fn derive_generic_pda(seeds: Vec<&[u8]>, program_id: Pubkey) -> Result<Pubkey, DeriveError> {
    let (pda, _) = derive_program_address(&seeds, &program_id)?;
    Ok(pda)
}

pub fn derive_metadata_pda(mint: &Pubkey, program_id: &Pubkey) -> Result<Pubkey, DeriveError> {
    let (pda, _) = derive_metadata_pda_and_bump(mint, program_id)?;
    Ok(pda)
}

pub fn derive_metadata_pda_and_bump(
    mint: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DeriveError> {
    let seeds = &[
        METADATA_PREFIX.as_bytes(),
        program_id.as_ref(),
        mint.as_ref(),
    ];

    derive_program_address(seeds, program_id)
}

use solana_program::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// Every bump produced an on-curve point. Only a corrupted program id or
    /// seed set can get here.
    #[error("no off-curve bump found for program {program_id}")]
    Exhausted { program_id: Pubkey },
}

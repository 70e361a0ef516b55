use thiserror::Error;

use crate::ledger::LedgerError;

/// Failures that abort a whole wallet lookup. Per-mint problems never show up
/// here; they are reported inline as a `MetadataOutcome`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid wallet address: {0}")]
    InvalidInput(String),

    #[error("ledger query failed: {0}")]
    UpstreamUnavailable(#[from] LedgerError),
}

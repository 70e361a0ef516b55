use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("rpc request failed: {0}")]
    ClientError(String),

    #[error("failed to parse string into Pubkey: {0}")]
    PubkeyParseFailed(String),

    #[error("unexpected token account encoding for {0}")]
    UnexpectedEncoding(String),
}

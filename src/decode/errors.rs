use thiserror::Error;

/// Reasons a metadata account is malformed. Decoding never returns a partial
/// record alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("account data is {len} bytes, shorter than the {min} byte minimum")]
    TooShort { len: usize, min: usize },

    #[error("unsupported metadata version {found}, expected {expected}")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("{field} needs {needed} bytes at offset {offset} but only {remaining} remain")]
    OutOfBounds {
        field: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}

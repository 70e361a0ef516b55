use solana_program::{pubkey, pubkey::Pubkey};

pub const PUBKEY_LENGTH: usize = 32;
pub const MAX_CREATOR_LEN: usize = 32 + 1 + 1;

// key: 1
// update_auth: 32,
// mint: 32,
// name string length: 4
// symbol string length: 4
// uri string length: 4
// seller fee basis points: 2
// whether or not there is a creators vec: 1
// primary sale happened: 1
// is mutable: 1
pub const MIN_METADATA_LEN: usize = 82;

/// `Key::MetadataV1` discriminator, the only metadata layout we decode.
pub const METADATA_V1_KEY: u8 = 4;

pub const METAPLEX_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
pub const SPL_TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const METADATA_PREFIX: &str = "metadata";
pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

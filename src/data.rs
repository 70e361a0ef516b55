use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::decode::DecodeError;
use crate::derive::DeriveError;

/// A decoded `MetadataV1` account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub key: u8,
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: i16,
    pub creators: Option<Vec<Creator>>,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub edition_nonce: Option<u8>,
    pub token_standard: Option<TokenStandard>,
    pub collection: Option<Collection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    pub share: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStandard {
    NonFungible,
    FungibleAsset,
    Fungible,
    NonFungibleEdition,
    ProgrammableNonFungible,
    ProgrammableNonFungibleEdition,
}

impl TokenStandard {
    /// `None` for discriminators added after this crate was written; the rest
    /// of the record is still valid.
    pub fn from_discriminator(value: u8) -> Option<Self> {
        match value {
            0 => Some(TokenStandard::NonFungible),
            1 => Some(TokenStandard::FungibleAsset),
            2 => Some(TokenStandard::Fungible),
            3 => Some(TokenStandard::NonFungibleEdition),
            4 => Some(TokenStandard::ProgrammableNonFungible),
            5 => Some(TokenStandard::ProgrammableNonFungibleEdition),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub verified: bool,
    pub key: Pubkey,
}

/// Creator shares that don't add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareWarning {
    pub total: u32,
    pub creators: usize,
}

impl Metadata {
    /// Shares are a producer-side invariant, so a bad total is reported rather
    /// than rejected.
    pub fn creator_share_warning(&self) -> Option<ShareWarning> {
        let creators = self.creators.as_ref()?;
        if creators.is_empty() {
            return None;
        }

        let total = creators.iter().map(|c| c.share as u32).sum();
        if total == 100 {
            None
        } else {
            Some(ShareWarning {
                total,
                creators: creators.len(),
            })
        }
    }
}

/// Per-mint result of the derive, fetch and decode steps.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataOutcome {
    Decoded(Metadata),
    /// The metadata PDA holds no account. Common, not an error.
    NotFound,
    Malformed(DecodeError),
    /// No off-curve metadata address exists for the mint.
    Underivable(DeriveError),
    TimedOut,
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNft {
    pub mint: Pubkey,
    pub outcome: MetadataOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    pub wallet: Pubkey,
    pub nfts: Vec<ResolvedNft>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletNfts {
    pub wallet: String,
    pub nfts: Vec<NftEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NftEntry {
    pub mint: String,
    pub metadata: Option<NFTData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NFTData {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: i16,
    pub creators: Vec<NFTCreator>,
    pub update_authority: String,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition_nonce: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_standard: Option<TokenStandard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<NFTCollection>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NFTCreator {
    pub address: String,
    pub verified: bool,
    pub share: u8,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NFTCollection {
    pub key: String,
    pub verified: bool,
}

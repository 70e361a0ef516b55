use solana_program::pubkey::Pubkey;
use std::str::FromStr;

use crate::data::{
    Collection, Creator, Metadata, MetadataOutcome, NFTCollection, NFTCreator, NFTData, NftEntry,
    ResolutionResult, ResolvedNft, WalletNfts,
};

pub trait ToPubkey {
    fn to_pubkey(&self) -> Result<Pubkey, String>;
}

impl ToPubkey for Pubkey {
    fn to_pubkey(&self) -> Result<Pubkey, String> {
        Ok(*self)
    }
}

impl ToPubkey for &str {
    fn to_pubkey(&self) -> Result<Pubkey, String> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Err("wallet address is required".to_string());
        }
        Pubkey::from_str(trimmed).map_err(|_| format!("invalid address: {trimmed}"))
    }
}

impl ToPubkey for String {
    fn to_pubkey(&self) -> Result<Pubkey, String> {
        self.as_str().to_pubkey()
    }
}

impl From<&Metadata> for NFTData {
    fn from(metadata: &Metadata) -> Self {
        NFTData {
            name: metadata.name.clone(),
            symbol: metadata.symbol.clone(),
            uri: metadata.uri.clone(),
            seller_fee_basis_points: metadata.seller_fee_basis_points,
            creators: metadata
                .creators
                .iter()
                .flatten()
                .map(NFTCreator::from)
                .collect(),
            update_authority: metadata.update_authority.to_string(),
            primary_sale_happened: metadata.primary_sale_happened,
            is_mutable: metadata.is_mutable,
            edition_nonce: metadata.edition_nonce,
            token_standard: metadata.token_standard,
            collection: metadata.collection.as_ref().map(NFTCollection::from),
        }
    }
}

impl From<&Creator> for NFTCreator {
    fn from(c: &Creator) -> Self {
        NFTCreator {
            address: c.address.to_string(),
            verified: c.verified,
            share: c.share,
        }
    }
}

impl From<&Collection> for NFTCollection {
    fn from(c: &Collection) -> Self {
        NFTCollection {
            key: c.key.to_string(),
            verified: c.verified,
        }
    }
}

impl From<&ResolvedNft> for NftEntry {
    fn from(nft: &ResolvedNft) -> Self {
        let (metadata, error) = match &nft.outcome {
            MetadataOutcome::Decoded(metadata) => (Some(NFTData::from(metadata)), None),
            MetadataOutcome::NotFound => (None, None),
            MetadataOutcome::Malformed(err) => (None, Some(format!("malformed metadata: {err}"))),
            MetadataOutcome::Underivable(err) => {
                (None, Some(format!("metadata address derivation failed: {err}")))
            }
            MetadataOutcome::TimedOut => (None, Some("metadata lookup timed out".to_string())),
            MetadataOutcome::Unavailable(err) => {
                (None, Some(format!("metadata lookup failed: {err}")))
            }
        };

        NftEntry {
            mint: nft.mint.to_string(),
            metadata,
            error,
        }
    }
}

impl From<&ResolutionResult> for WalletNfts {
    fn from(result: &ResolutionResult) -> Self {
        WalletNfts {
            wallet: result.wallet.to_string(),
            nfts: result.nfts.iter().map(NftEntry::from).collect(),
        }
    }
}

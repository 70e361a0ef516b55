use solana_program::pubkey::Pubkey;
use std::{sync::Arc, time::Duration};
use tokio::{sync::Semaphore, time::timeout};
use tracing::{debug, error, info, warn};

pub mod errors;
pub use errors::ResolveError;

use crate::config::{ConfigError, ResolverConfig};
use crate::convert::ToPubkey;
use crate::data::{MetadataOutcome, ResolutionResult, ResolvedNft};
use crate::decode::decode_metadata;
use crate::derive::derive_metadata_pda;
use crate::ledger::{LedgerClient, LedgerError};

/// Turns a wallet's holdings into decoded metadata, one mint at a time but
/// many mints at once.
pub struct Resolver<L> {
    ledger: Arc<L>,
    program_id: Pubkey,
    limiter: Arc<Semaphore>,
    fetch_timeout: Duration,
}

impl<L: LedgerClient + 'static> Resolver<L> {
    pub fn new(config: &ResolverConfig, ledger: L) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::with_limits(
            ledger,
            config.program_id()?,
            config.max_concurrency,
            config.fetch_timeout(),
        ))
    }

    pub fn with_limits(
        ledger: L,
        program_id: Pubkey,
        max_concurrency: usize,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            ledger: Arc::new(ledger),
            program_id,
            limiter: Arc::new(Semaphore::new(max_concurrency.max(1))),
            fetch_timeout,
        }
    }

    /// Looks up the wallet's token accounts and resolves every mint found.
    pub async fn resolve_wallet<W: ToPubkey>(
        &self,
        wallet: W,
    ) -> Result<ResolutionResult, ResolveError> {
        let wallet = wallet.to_pubkey().map_err(ResolveError::InvalidInput)?;
        info!(wallet = %wallet, "resolving wallet holdings");

        let ledger = Arc::clone(&self.ledger);
        let mints = tokio::task::spawn_blocking(move || ledger.get_token_mints(&wallet))
            .await
            .map_err(|err| LedgerError::ClientError(err.to_string()))??;

        let nfts = self.resolve(&mints).await;
        Ok(ResolutionResult { wallet, nfts })
    }

    /// One entry per mint, in the order given. Whatever goes wrong for a
    /// single mint stays in its entry.
    pub async fn resolve(&self, mints: &[Pubkey]) -> Vec<ResolvedNft> {
        let handles: Vec<_> = mints
            .iter()
            .map(|mint| match derive_metadata_pda(mint, &self.program_id) {
                Ok(pda) => Ok(tokio::spawn(fetch_metadata(
                    Arc::clone(&self.ledger),
                    Arc::clone(&self.limiter),
                    self.fetch_timeout,
                    *mint,
                    pda,
                ))),
                Err(err) => {
                    error!(mint = %mint, error = %err, "metadata address derivation failed");
                    Err(err)
                }
            })
            .collect();

        let mut nfts = Vec::with_capacity(handles.len());
        for (mint, handle) in mints.iter().zip(handles) {
            let outcome = match handle {
                Ok(handle) => handle
                    .await
                    .unwrap_or_else(|err| MetadataOutcome::Unavailable(err.to_string())),
                Err(err) => MetadataOutcome::Underivable(err),
            };
            nfts.push(ResolvedNft {
                mint: *mint,
                outcome,
            });
        }

        let decoded = nfts
            .iter()
            .filter(|nft| matches!(nft.outcome, MetadataOutcome::Decoded(_)))
            .count();
        info!(mints = nfts.len(), decoded, "resolved holdings");

        nfts
    }
}

async fn fetch_metadata<L: LedgerClient + 'static>(
    ledger: Arc<L>,
    limiter: Arc<Semaphore>,
    fetch_timeout: Duration,
    mint: Pubkey,
    pda: Pubkey,
) -> MetadataOutcome {
    let permit = match limiter.acquire_owned().await {
        Ok(permit) => permit,
        Err(err) => return MetadataOutcome::Unavailable(err.to_string()),
    };

    // The permit moves into the blocking call so an abandoned fetch keeps
    // counting against the limit until the RPC actually returns.
    let fetch = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        ledger.get_account_data(&pda)
    });

    let data = match timeout(fetch_timeout, fetch).await {
        Err(_) => {
            warn!(mint = %mint, metadata = %pda, "metadata fetch timed out");
            return MetadataOutcome::TimedOut;
        }
        Ok(Err(err)) => return MetadataOutcome::Unavailable(err.to_string()),
        Ok(Ok(Err(err))) => {
            warn!(mint = %mint, metadata = %pda, error = %err, "metadata fetch failed");
            return MetadataOutcome::Unavailable(err.to_string());
        }
        Ok(Ok(Ok(None))) => {
            debug!(mint = %mint, metadata = %pda, "no metadata account");
            return MetadataOutcome::NotFound;
        }
        // A stray lamport transfer leaves an account with no data behind.
        Ok(Ok(Ok(Some(data)))) if data.is_empty() => {
            debug!(mint = %mint, metadata = %pda, "metadata account holds no data");
            return MetadataOutcome::NotFound;
        }
        Ok(Ok(Ok(Some(data)))) => data,
    };

    match decode_metadata(&data) {
        Ok(metadata) => {
            if let Some(warning) = metadata.creator_share_warning() {
                warn!(
                    mint = %mint,
                    total = warning.total,
                    creators = warning.creators,
                    "creator shares do not sum to 100"
                );
            }
            debug!(mint = %mint, name = %metadata.name, "decoded metadata");
            MetadataOutcome::Decoded(metadata)
        }
        Err(err) => {
            warn!(mint = %mint, len = data.len(), error = %err, "malformed metadata account");
            MetadataOutcome::Malformed(err)
        }
    }
}

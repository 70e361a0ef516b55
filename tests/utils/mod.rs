#![allow(dead_code)]

use borsh::BorshSerialize;
use nft_holdings::{
    constants::{METADATA_V1_KEY, METAPLEX_PROGRAM_ID},
    derive::derive_metadata_pda,
    ledger::{LedgerClient, LedgerError},
    resolve::Resolver,
};
use solana_program::pubkey::Pubkey;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

#[derive(BorshSerialize, Clone)]
pub struct RawCreator {
    pub address: [u8; 32],
    pub verified: bool,
    pub share: u8,
}

/// Field-for-field mirror of a `MetadataV1` account as the program writes it.
#[derive(BorshSerialize, Clone)]
pub struct RawMetadata {
    pub key: u8,
    pub update_authority: [u8; 32],
    pub mint: [u8; 32],
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: i16,
    pub creators: Option<Vec<RawCreator>>,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
}

pub const UPDATE_AUTHORITY: [u8; 32] = [7; 32];

pub fn sample_metadata(mint: &Pubkey, name: &str) -> RawMetadata {
    RawMetadata {
        key: METADATA_V1_KEY,
        update_authority: UPDATE_AUTHORITY,
        mint: mint.to_bytes(),
        name: name.to_string(),
        symbol: "SAM".to_string(),
        uri: "https://x/1.json".to_string(),
        seller_fee_basis_points: 500,
        creators: None,
        primary_sale_happened: false,
        is_mutable: true,
    }
}

pub fn encode(raw: &RawMetadata) -> Vec<u8> {
    borsh::to_vec(raw).unwrap()
}

#[derive(Default)]
pub struct FetchStats {
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

/// In-memory ledger keyed by mint; metadata is stored under the derived PDA
/// just like on chain.
#[derive(Default)]
pub struct MockLedger {
    holdings: HashMap<Pubkey, Vec<Pubkey>>,
    accounts: HashMap<Pubkey, Vec<u8>>,
    failing: HashSet<Pubkey>,
    delays: HashMap<Pubkey, Duration>,
    fetch_delay: Duration,
    holdings_down: bool,
    pub stats: Arc<FetchStats>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holdings(mut self, wallet: Pubkey, mints: &[Pubkey]) -> Self {
        self.holdings.insert(wallet, mints.to_vec());
        self
    }

    pub fn with_account(mut self, mint: &Pubkey, data: Vec<u8>) -> Self {
        self.accounts.insert(metadata_address(mint), data);
        self
    }

    pub fn with_metadata(self, mint: &Pubkey, raw: &RawMetadata) -> Self {
        self.with_account(mint, encode(raw))
    }

    pub fn with_failure(mut self, mint: &Pubkey) -> Self {
        self.failing.insert(metadata_address(mint));
        self
    }

    pub fn with_delay(mut self, mint: &Pubkey, delay: Duration) -> Self {
        self.delays.insert(metadata_address(mint), delay);
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn with_holdings_down(mut self) -> Self {
        self.holdings_down = true;
        self
    }
}

impl LedgerClient for MockLedger {
    fn get_token_mints(&self, owner: &Pubkey) -> Result<Vec<Pubkey>, LedgerError> {
        if self.holdings_down {
            return Err(LedgerError::ClientError("connection refused".to_string()));
        }
        Ok(self.holdings.get(owner).cloned().unwrap_or_default())
    }

    fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError> {
        self.stats.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(address).copied().unwrap_or(self.fetch_delay);
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        let result = if self.failing.contains(address) {
            Err(LedgerError::ClientError("node is behind".to_string()))
        } else {
            Ok(self.accounts.get(address).cloned())
        };

        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    derive_metadata_pda(mint, &METAPLEX_PROGRAM_ID).unwrap()
}

pub fn resolver(ledger: MockLedger) -> Resolver<MockLedger> {
    Resolver::with_limits(ledger, METAPLEX_PROGRAM_ID, 4, Duration::from_secs(2))
}

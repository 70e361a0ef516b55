use retry::{delay::Exponential, retry};
use serde::Deserialize;
use solana_account_decoder::UiAccountData;
use solana_client::{
    rpc_client::RpcClient, rpc_request::TokenAccountsFilter, rpc_response::RpcKeyedAccount,
};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::str::FromStr;
use tracing::debug;

pub mod errors;
pub use errors::LedgerError;

use crate::config::{ConfigError, ResolverConfig};
use crate::constants::SPL_TOKEN_PROGRAM_ID;

/// Read-only view of the ledger the resolver depends on.
pub trait LedgerClient: Send + Sync {
    /// Mints of the token accounts owned by `owner`, in the order the node
    /// returns them.
    fn get_token_mints(&self, owner: &Pubkey) -> Result<Vec<Pubkey>, LedgerError>;

    /// Raw data of `address`, or `None` when no account (or only an empty
    /// one) exists there.
    fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError>;
}

pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
    retries: usize,
    include_empty_accounts: bool,
}

impl RpcLedger {
    pub fn new(config: &ResolverConfig) -> Result<Self, ConfigError> {
        let commitment = config.commitment()?;
        let client = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            config.rpc_timeout(),
            commitment,
        );

        Ok(Self {
            client,
            commitment,
            retries: config.rpc_retries,
            include_empty_accounts: config.include_empty_accounts,
        })
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    fn backoff(&self) -> impl Iterator<Item = std::time::Duration> {
        Exponential::from_millis_with_factor(250, 2.0).take(self.retries)
    }
}

impl LedgerClient for RpcLedger {
    fn get_token_mints(&self, owner: &Pubkey) -> Result<Vec<Pubkey>, LedgerError> {
        let accounts = retry(self.backoff(), || {
            self.client.get_token_accounts_by_owner(
                owner,
                TokenAccountsFilter::ProgramId(SPL_TOKEN_PROGRAM_ID),
            )
        })
        .map_err(|err| LedgerError::ClientError(err.to_string()))?;

        debug!(owner = %owner, accounts = accounts.len(), "fetched token accounts");

        held_mints(&accounts, self.include_empty_accounts)
    }

    fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, LedgerError> {
        let response = retry(self.backoff(), || {
            self.client.get_account_with_commitment(address, self.commitment)
        })
        .map_err(|err| LedgerError::ClientError(err.to_string()))?;

        Ok(response
            .value
            .filter(|account| !account.data.is_empty())
            .map(|account| account.data))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHolding {
    pub token_account: String,
    pub mint: Pubkey,
    pub amount: u64,
    pub decimals: u8,
}

#[derive(Debug, Deserialize)]
struct ParsedTokenAccount {
    info: TokenAccountInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAccountInfo {
    mint: String,
    token_amount: TokenAmount,
}

#[derive(Debug, Deserialize)]
struct TokenAmount {
    amount: String,
    decimals: u8,
}

/// Reads `parsed.info` of a `jsonParsed` SPL token account.
pub fn parse_token_account(account: &RpcKeyedAccount) -> Result<TokenHolding, LedgerError> {
    let parsed = match &account.account.data {
        UiAccountData::Json(parsed) => parsed,
        _ => return Err(LedgerError::UnexpectedEncoding(account.pubkey.clone())),
    };

    let token_account: ParsedTokenAccount = serde_json::from_value(parsed.parsed.clone())
        .map_err(|_| LedgerError::UnexpectedEncoding(account.pubkey.clone()))?;
    let info = token_account.info;

    let mint = Pubkey::from_str(&info.mint)
        .map_err(|_| LedgerError::PubkeyParseFailed(info.mint.clone()))?;
    let amount = info
        .token_amount
        .amount
        .parse::<u64>()
        .map_err(|_| LedgerError::UnexpectedEncoding(account.pubkey.clone()))?;

    Ok(TokenHolding {
        token_account: account.pubkey.clone(),
        mint,
        amount,
        decimals: info.token_amount.decimals,
    })
}

/// Mints of `accounts` in order, dropping zero balances unless
/// `include_empty` is set.
pub fn held_mints(
    accounts: &[RpcKeyedAccount],
    include_empty: bool,
) -> Result<Vec<Pubkey>, LedgerError> {
    let mut mints = Vec::with_capacity(accounts.len());
    for account in accounts {
        let holding = parse_token_account(account)?;
        if holding.amount > 0 || include_empty {
            mints.push(holding.mint);
        }
    }

    Ok(mints)
}

use std::fmt::Debug;

use async_trait::async_trait;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{
    rate_limiter::RateLimiter,
    rpc::{
        errors::RpcError,
        filters::{DataSlice, MemcmpFilter},
        solana_rpc::{RetryConfig, SolanaRpcUrl},
    },
};

#[derive(Debug, Clone)]
pub struct RpcConnectionConfig {
    pub url: String,
    pub commitment_config: Option<CommitmentConfig>,
    pub retry_config: Option<RetryConfig>,
}

impl RpcConnectionConfig {
    pub fn new(url: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            commitment_config: Some(CommitmentConfig::confirmed()),
            retry_config: None,
        }
    }

    pub fn local() -> Self {
        Self::new(SolanaRpcUrl::Localnet)
    }
}

/// Byte oriented account transport.
///
/// Implementations own retry and rate limiting. Callers issue one request per
/// logical operation and never retry on their own.
#[async_trait]
pub trait RpcConnection: Send + Sync + Debug + 'static {
    fn new(config: RpcConnectionConfig) -> Self
    where
        Self: Sized;

    fn get_url(&self) -> String;

    fn set_rpc_rate_limiter(&mut self, rate_limiter: RateLimiter);
    fn rpc_rate_limiter(&self) -> Option<&RateLimiter>;

    async fn check_rpc_rate_limit(&self) {
        if let Some(limiter) = self.rpc_rate_limiter() {
            limiter.acquire_with_wait().await;
        }
    }

    async fn health(&self) -> Result<(), RpcError>;

    async fn get_account(&self, address: Pubkey) -> Result<Option<Account>, RpcError>;

    /// Returns one entry per requested address, in request order.
    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, RpcError>;

    /// Returns every account owned by `program_id` matching all `filters`.
    /// With a zero length `data_slice` only the addresses are meaningful.
    async fn get_program_accounts_with_filters(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
        data_slice: Option<DataSlice>,
    ) -> Result<Vec<(Pubkey, Account)>, RpcError>;
}

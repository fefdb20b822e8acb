use std::{
    fmt::{Debug, Display, Formatter},
    future::Future,
    time::Duration,
};

use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
};
use solana_rpc_client_api::{filter::RpcFilterType, request::MAX_MULTIPLE_ACCOUNTS};
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::rpc_connection::RpcConnectionConfig;
use crate::{
    rate_limiter::RateLimiter,
    rpc::{
        errors::RpcError,
        filters::{DataSlice, MemcmpFilter},
        rpc_connection::RpcConnection,
    },
};

pub enum SolanaRpcUrl {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
    Custom(String),
}

impl Display for SolanaRpcUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            SolanaRpcUrl::Mainnet => "https://api.mainnet-beta.solana.com".to_string(),
            SolanaRpcUrl::Testnet => "https://api.testnet.solana.com".to_string(),
            SolanaRpcUrl::Devnet => "https://api.devnet.solana.com".to_string(),
            SolanaRpcUrl::Localnet => "http://localhost:8899".to_string(),
            SolanaRpcUrl::Custom(url) => url.clone(),
        };
        write!(f, "{}", str)
    }
}

#[derive(Clone, Debug, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Total time budget across all attempts of one request.
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 30,
            retry_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(60),
        }
    }
}

pub struct SolanaRpcConnection {
    pub client: RpcClient,
    pub retry_config: RetryConfig,
    rate_limiter: Option<RateLimiter>,
}

impl Debug for SolanaRpcConnection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolanaRpcConnection {{ client: {:?} }}",
            self.client.url()
        )
    }
}

impl SolanaRpcConnection {
    pub fn new_with_retry(config: RpcConnectionConfig, retry_config: Option<RetryConfig>) -> Self {
        let commitment_config = config
            .commitment_config
            .unwrap_or(CommitmentConfig::confirmed());
        let client = RpcClient::new_with_commitment(config.url, commitment_config);
        let retry_config = retry_config.or(config.retry_config).unwrap_or_default();
        Self {
            client,
            retry_config,
            rate_limiter: None,
        }
    }

    async fn retry<F, Fut, T>(&self, operation: F) -> Result<T, RpcError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        let mut attempts = 0;
        let start_time = Instant::now();
        loop {
            self.check_rpc_rate_limit().await;
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !e.is_transient() {
                        return Err(e);
                    }
                    attempts += 1;
                    if attempts >= self.retry_config.max_retries
                        || start_time.elapsed() >= self.retry_config.timeout
                    {
                        return Err(e);
                    }
                    warn!(
                        "Operation failed, retrying in {:?} (attempt {}/{}): {:?}",
                        self.retry_config.retry_delay, attempts, self.retry_config.max_retries, e
                    );
                    tokio::task::yield_now().await;
                    sleep(self.retry_config.retry_delay).await;
                }
            }
        }
    }
}

/// Splits `addresses` into requests of at most `chunk_size` keys, since nodes
/// reject larger `getMultipleAccounts` calls, and concatenates the responses
/// in request order.
///
/// Every response must hold exactly one entry per requested key.
pub(crate) async fn fetch_in_chunks<'a, T, F, Fut>(
    addresses: &'a [Pubkey],
    chunk_size: usize,
    mut fetch: F,
) -> Result<Vec<T>, RpcError>
where
    F: FnMut(&'a [Pubkey]) -> Fut,
    Fut: Future<Output = Result<Vec<T>, RpcError>>,
{
    let mut results = Vec::with_capacity(addresses.len());
    for chunk in addresses.chunks(chunk_size.max(1)) {
        let chunk_results = fetch(chunk).await?;
        if chunk_results.len() != chunk.len() {
            return Err(RpcError::ResponseLengthMismatch {
                requested: chunk.len(),
                received: chunk_results.len(),
            });
        }
        results.extend(chunk_results);
    }
    Ok(results)
}

#[async_trait]
impl RpcConnection for SolanaRpcConnection {
    fn new(config: RpcConnectionConfig) -> Self
    where
        Self: Sized,
    {
        Self::new_with_retry(config, None)
    }

    fn get_url(&self) -> String {
        self.client.url()
    }

    fn set_rpc_rate_limiter(&mut self, rate_limiter: RateLimiter) {
        self.rate_limiter = Some(rate_limiter);
    }

    fn rpc_rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref()
    }

    async fn health(&self) -> Result<(), RpcError> {
        self.retry(|| async { self.client.get_health().await.map_err(RpcError::from) })
            .await
    }

    async fn get_account(&self, address: Pubkey) -> Result<Option<Account>, RpcError> {
        self.retry(|| async {
            self.client
                .get_account_with_commitment(&address, self.client.commitment())
                .await
                .map(|response| response.value)
                .map_err(RpcError::from)
        })
        .await
    }

    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, RpcError> {
        let commitment = self.client.commitment();
        fetch_in_chunks(addresses, MAX_MULTIPLE_ACCOUNTS, move |chunk| {
            self.retry(move || async move {
                self.client
                    .get_multiple_accounts_with_commitment(chunk, commitment)
                    .await
                    .map(|response| response.value)
                    .map_err(RpcError::from)
            })
        })
        .await
    }

    async fn get_program_accounts_with_filters(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
        data_slice: Option<DataSlice>,
    ) -> Result<Vec<(Pubkey, Account)>, RpcError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.iter().cloned().map(RpcFilterType::from).collect()),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                data_slice: data_slice.map(Into::into),
                commitment: Some(self.client.commitment()),
                ..Default::default()
            },
            ..Default::default()
        };
        debug!(
            "getProgramAccounts {} with {} filters, data slice {:?}",
            program_id,
            filters.len(),
            data_slice
        );
        self.retry(|| async {
            self.client
                .get_program_accounts_with_config(program_id, config.clone())
                .await
                .map_err(RpcError::from)
        })
        .await
    }
}

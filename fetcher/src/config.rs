use std::time::Duration;

use parcl_v3_client::{
    rate_limiter::RateLimiter,
    rpc::{RetryConfig, RpcConnection, RpcConnectionConfig, SolanaRpcConnection},
    ScanPacing,
};
use solana_sdk::commitment_config::CommitmentConfig;

use crate::cli::RpcArgs;

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub retry_config: RetryConfig,
    pub rpc_requests_per_second: Option<u32>,
    pub scan_pacing: ScanPacing,
}

impl From<&RpcArgs> for FetcherConfig {
    fn from(args: &RpcArgs) -> Self {
        Self {
            rpc_url: args.rpc_url.clone(),
            commitment: args.commitment.into(),
            retry_config: RetryConfig {
                max_retries: args.max_retries,
                retry_delay: Duration::from_millis(args.retry_delay_ms),
                timeout: Duration::from_millis(args.retry_timeout_ms),
            },
            rpc_requests_per_second: args.rpc_requests_per_second,
            scan_pacing: ScanPacing::fixed(Duration::from_secs(args.scan_delay_secs)),
        }
    }
}

impl FetcherConfig {
    pub fn connection_config(&self) -> RpcConnectionConfig {
        RpcConnectionConfig {
            url: self.rpc_url.clone(),
            commitment_config: Some(self.commitment),
            retry_config: Some(self.retry_config),
        }
    }

    pub fn connect(&self) -> SolanaRpcConnection {
        let mut rpc = SolanaRpcConnection::new(self.connection_config());
        if let Some(requests_per_second) = self.rpc_requests_per_second {
            rpc.set_rpc_rate_limiter(RateLimiter::new(requests_per_second));
        }
        rpc
    }
}

use parcl_v3_accounts::AccountLayoutError;
use pyth_sdk_solana::PythError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::rpc::RpcError;

#[derive(Error, Debug)]
pub enum FetcherError {
    #[error("Account retrieval failed: {0}")]
    Rpc(#[from] RpcError),

    #[error("Account {address}: {source}")]
    MalformedAccount {
        address: Pubkey,
        #[source]
        source: AccountLayoutError,
    },

    #[error("Price feed {address}: {source}")]
    PriceFeed {
        address: Pubkey,
        #[source]
        source: PythError,
    },
}

impl FetcherError {
    pub fn malformed(address: Pubkey, source: AccountLayoutError) -> Self {
        FetcherError::MalformedAccount { address, source }
    }

    /// True if the payload did not have the size of the requested kind.
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            FetcherError::MalformedAccount { source, .. } if source.is_malformed_record()
        )
    }
}

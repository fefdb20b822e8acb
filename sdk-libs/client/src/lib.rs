pub mod fetcher;
pub mod rate_limiter;
pub mod rpc;

pub use fetcher::{
    AccountSlot, FetcherError, LiquidationScanStrategy, ParclAccountFetcher, PriceFeedSlot,
    ProgramAccount, ScanPacing, SubSlotScan,
};
pub use parcl_v3_accounts;
pub use pyth_sdk_solana;

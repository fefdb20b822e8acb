mod errors;
mod scan;
mod types;

use std::collections::HashSet;

pub use errors::FetcherError;
use parcl_v3_accounts::{
    AccountKind, AccountLayoutError, AccountPayload, Exchange, LpAccount, MarginAccount, Market,
    ParclAccount, RawAccount, SettlementRequest,
};
use pyth_sdk_solana::{state::SolanaPriceAccount, PriceFeed};
pub use scan::{LiquidationScanStrategy, ScanPacing, SubSlotScan};
use solana_sdk::{account::Account, pubkey::Pubkey};
use tokio::time::sleep;
use tracing::{debug, info};
pub use types::{AccountSlot, PriceFeedSlot, ProgramAccount};

use crate::rpc::{DataSlice, MemcmpFilter, RpcConnection, RpcError};

/// Typed read access to the accounts of the Parcl V3 program.
///
/// Every operation issues exactly one request to the underlying connection,
/// except [`ParclAccountFetcher::scan_sub_slots`] which issues one per slot.
/// Retries are left to the connection.
#[derive(Debug)]
pub struct ParclAccountFetcher<R: RpcConnection> {
    rpc: R,
    program_id: Pubkey,
}

impl<R: RpcConnection> ParclAccountFetcher<R> {
    pub fn new(rpc: R) -> Self {
        Self::with_program_id(rpc, parcl_v3_accounts::ID)
    }

    pub fn with_program_id(rpc: R, program_id: Pubkey) -> Self {
        Self { rpc, program_id }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Fetches and decodes the account at `address` as `T`.
    /// Returns `None` if no account exists there.
    pub async fn get_account<T: AccountKind>(
        &self,
        address: Pubkey,
    ) -> Result<Option<T>, FetcherError> {
        let account = self.rpc.get_account(address).await?;
        decode_raw::<T>(&RawAccount::new(address, account.map(|a| a.data)))
            .map_err(|source| FetcherError::malformed(address, source))
    }

    /// Fetches the account at `address` and decodes it as whatever kind its
    /// discriminator names.
    pub async fn get_any_account(
        &self,
        address: Pubkey,
    ) -> Result<Option<ParclAccount>, FetcherError> {
        let account = self.rpc.get_account(address).await?;
        account
            .map(|account| ParclAccount::decode(&account.data))
            .transpose()
            .map_err(|source| FetcherError::malformed(address, source))
    }

    /// Fetches all `addresses` in one batched request.
    ///
    /// The result has one slot per address, in request order. A slot that
    /// fails to decode does not affect its neighbours.
    pub async fn get_accounts<T: AccountKind>(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<AccountSlot<T>>, FetcherError> {
        let accounts = self.get_multiple_accounts(addresses).await?;
        debug!(
            "Fetched {} of {} requested {} accounts",
            accounts.iter().filter(|a| a.is_some()).count(),
            addresses.len(),
            T::NAME
        );
        Ok(addresses
            .iter()
            .zip(accounts)
            .map(|(address, account)| {
                let raw = RawAccount::new(*address, account.map(|a| a.data));
                decode_raw::<T>(&raw).map(|decoded| {
                    decoded.map(|account| ProgramAccount {
                        address: *address,
                        account,
                    })
                })
            })
            .collect())
    }

    /// Reads the Pyth price account at `address`, such as the one named by
    /// `Market::price_feed`. Returns `None` if no account exists there.
    pub async fn get_price_feed(&self, address: Pubkey) -> Result<Option<PriceFeed>, FetcherError> {
        let Some(mut account) = self.rpc.get_account(address).await? else {
            return Ok(None);
        };
        SolanaPriceAccount::account_to_feed(&address, &mut account)
            .map(Some)
            .map_err(|source| FetcherError::PriceFeed { address, source })
    }

    /// Batched [`ParclAccountFetcher::get_price_feed`], one slot per address in
    /// request order.
    pub async fn get_price_feeds(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<PriceFeedSlot>, FetcherError> {
        let accounts = self.get_multiple_accounts(addresses).await?;
        Ok(addresses
            .iter()
            .zip(accounts)
            .map(|(address, account)| {
                account
                    .map(|mut account| {
                        SolanaPriceAccount::account_to_feed(address, &mut account).map(|feed| {
                            ProgramAccount {
                                address: *address,
                                account: feed,
                            }
                        })
                    })
                    .transpose()
            })
            .collect())
    }

    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, FetcherError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }
        let accounts = self.rpc.get_multiple_accounts(addresses).await?;
        if accounts.len() != addresses.len() {
            return Err(RpcError::ResponseLengthMismatch {
                requested: addresses.len(),
                received: accounts.len(),
            }
            .into());
        }
        Ok(accounts)
    }

    /// Every account of kind `T` owned by the program.
    pub async fn get_all<T: AccountKind>(&self) -> Result<Vec<ProgramAccount<T>>, FetcherError> {
        self.get_all_with_filters::<T>(&[]).await
    }

    /// Addresses of every account of kind `T`, without transferring any data.
    pub async fn get_all_addresses<T: AccountKind>(&self) -> Result<Vec<Pubkey>, FetcherError> {
        let accounts = self
            .rpc
            .get_program_accounts_with_filters(
                &self.program_id,
                &[MemcmpFilter::discriminator(&T::DISCRIMINATOR)],
                Some(DataSlice::EMPTY),
            )
            .await?;
        debug!("Found {} {} addresses", accounts.len(), T::NAME);
        Ok(accounts.into_iter().map(|(address, _)| address).collect())
    }

    /// Accounts of kind `T` matching every filter in `filters`.
    ///
    /// Filter offsets address the raw account data, discriminator included.
    /// Fails on the first returned account whose payload does not have the
    /// size of `T`.
    pub async fn get_all_with_filters<T: AccountKind>(
        &self,
        filters: &[MemcmpFilter],
    ) -> Result<Vec<ProgramAccount<T>>, FetcherError> {
        let mut all_filters = Vec::with_capacity(filters.len() + 1);
        all_filters.push(MemcmpFilter::discriminator(&T::DISCRIMINATOR));
        all_filters.extend_from_slice(filters);

        let accounts = self
            .rpc
            .get_program_accounts_with_filters(&self.program_id, &all_filters, None)
            .await?;
        debug!(
            "Scan for {} with {} filters returned {} accounts",
            T::NAME,
            all_filters.len(),
            accounts.len()
        );
        accounts
            .into_iter()
            .map(|(address, account)| decode_scanned::<T>(address, account))
            .collect()
    }

    /// Runs one filtered scan per slot of `scan` and returns the union,
    /// deduplicated by address in first-seen order.
    ///
    /// Waits as configured by `pacing` between consecutive requests, never
    /// before the first one.
    pub async fn scan_sub_slots<T: AccountKind>(
        &self,
        scan: &SubSlotScan,
        pacing: &ScanPacing,
    ) -> Result<Vec<ProgramAccount<T>>, FetcherError> {
        let mut seen = HashSet::new();
        let mut accounts = Vec::new();
        for (completed, offset) in scan.offsets().enumerate() {
            let delay = pacing.delay_after(u32::try_from(completed).unwrap_or(u32::MAX));
            if !delay.is_zero() {
                info!(
                    "Waiting {:?} before scanning {} slot {}/{} at offset {}",
                    delay,
                    T::NAME,
                    completed + 1,
                    scan.slots,
                    offset
                );
                sleep(delay).await;
            }
            let found = self
                .get_all_with_filters::<T>(&[MemcmpFilter::new(offset, scan.value.clone())])
                .await?;
            for account in found {
                if seen.insert(account.address) {
                    accounts.push(account);
                }
            }
        }
        Ok(accounts)
    }

    pub async fn get_in_liquidation_margin_accounts(
        &self,
        strategy: &LiquidationScanStrategy,
    ) -> Result<Vec<ProgramAccount<MarginAccount>>, FetcherError> {
        let accounts = match strategy {
            LiquidationScanStrategy::DecodeAll => {
                let mut accounts = self.get_all::<MarginAccount>().await?;
                accounts.retain(|margin_account| margin_account.account.is_in_liquidation());
                accounts
            }
            LiquidationScanStrategy::PerSlot { scan, pacing } => {
                self.scan_sub_slots::<MarginAccount>(scan, pacing).await?
            }
        };
        info!("Found {} margin accounts in liquidation", accounts.len());
        Ok(accounts)
    }

    /// Margin accounts holding at least one position with a non zero size.
    pub async fn get_all_margin_accounts_with_positions(
        &self,
    ) -> Result<Vec<ProgramAccount<MarginAccount>>, FetcherError> {
        let mut accounts = self.get_all::<MarginAccount>().await?;
        accounts.retain(|margin_account| margin_account.account.has_positions());
        Ok(accounts)
    }

    pub async fn get_exchange(&self, address: Pubkey) -> Result<Option<Exchange>, FetcherError> {
        self.get_account(address).await
    }

    pub async fn get_market(&self, address: Pubkey) -> Result<Option<Market>, FetcherError> {
        self.get_account(address).await
    }

    pub async fn get_margin_account(
        &self,
        address: Pubkey,
    ) -> Result<Option<MarginAccount>, FetcherError> {
        self.get_account(address).await
    }

    pub async fn get_lp_account(&self, address: Pubkey) -> Result<Option<LpAccount>, FetcherError> {
        self.get_account(address).await
    }

    pub async fn get_settlement_request(
        &self,
        address: Pubkey,
    ) -> Result<Option<SettlementRequest>, FetcherError> {
        self.get_account(address).await
    }

    pub async fn get_exchanges(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<AccountSlot<Exchange>>, FetcherError> {
        self.get_accounts(addresses).await
    }

    pub async fn get_markets(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<AccountSlot<Market>>, FetcherError> {
        self.get_accounts(addresses).await
    }

    pub async fn get_margin_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<AccountSlot<MarginAccount>>, FetcherError> {
        self.get_accounts(addresses).await
    }

    pub async fn get_lp_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<AccountSlot<LpAccount>>, FetcherError> {
        self.get_accounts(addresses).await
    }

    pub async fn get_settlement_requests(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<AccountSlot<SettlementRequest>>, FetcherError> {
        self.get_accounts(addresses).await
    }

    pub async fn get_all_exchanges(&self) -> Result<Vec<ProgramAccount<Exchange>>, FetcherError> {
        self.get_all().await
    }

    pub async fn get_all_markets(&self) -> Result<Vec<ProgramAccount<Market>>, FetcherError> {
        self.get_all().await
    }

    pub async fn get_all_margin_accounts(
        &self,
    ) -> Result<Vec<ProgramAccount<MarginAccount>>, FetcherError> {
        self.get_all().await
    }

    pub async fn get_all_lp_accounts(
        &self,
    ) -> Result<Vec<ProgramAccount<LpAccount>>, FetcherError> {
        self.get_all().await
    }

    pub async fn get_all_settlement_requests(
        &self,
    ) -> Result<Vec<ProgramAccount<SettlementRequest>>, FetcherError> {
        self.get_all().await
    }

    pub async fn get_all_margin_account_addresses(&self) -> Result<Vec<Pubkey>, FetcherError> {
        self.get_all_addresses::<MarginAccount>().await
    }

    pub async fn get_all_settlement_request_addresses(&self) -> Result<Vec<Pubkey>, FetcherError> {
        self.get_all_addresses::<SettlementRequest>().await
    }
}

fn decode_raw<T: AccountKind>(raw: &RawAccount) -> Result<Option<T>, AccountLayoutError> {
    raw.strip_discriminator()?
        .map(|payload| payload.decode::<T>())
        .transpose()
}

fn decode_scanned<T: AccountKind>(
    address: Pubkey,
    account: Account,
) -> Result<ProgramAccount<T>, FetcherError> {
    AccountPayload::new(address, &account.data)
        .and_then(|payload| payload.decode::<T>())
        .map(|account| ProgramAccount { address, account })
        .map_err(|source| FetcherError::malformed(address, source))
}

#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use borsh::BorshSerialize;
use parcl_v3_client::{
    parcl_v3_accounts::{self, AccountKind, MarginAccount, Position},
    rate_limiter::RateLimiter,
    rpc::{DataSlice, MemcmpFilter, RpcConnection, RpcConnectionConfig, RpcError},
};
use solana_sdk::{account::Account, pubkey::Pubkey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcCall {
    GetAccount(Pubkey),
    GetMultipleAccounts(Vec<Pubkey>),
    GetProgramAccounts {
        filters: Vec<MemcmpFilter>,
        data_slice: Option<DataSlice>,
    },
}

/// In-memory ledger serving program accounts the way an RPC node does.
#[derive(Debug, Default)]
pub struct MockRpc {
    accounts: BTreeMap<Pubkey, Account>,
    calls: Mutex<Vec<RpcCall>>,
    fail: bool,
    drop_last_entry: bool,
    rate_limiter: Option<RateLimiter>,
}

impl MockRpc {
    /// Every request fails with a non transient error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Batched responses lose their last entry.
    pub fn truncating() -> Self {
        Self {
            drop_last_entry: true,
            ..Self::default()
        }
    }

    pub fn insert(&mut self, address: Pubkey, data: Vec<u8>) {
        self.insert_with_owner(address, data, parcl_v3_accounts::ID);
    }

    pub fn insert_with_owner(&mut self, address: Pubkey, data: Vec<u8>, owner: Pubkey) {
        self.accounts.insert(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RpcCall) -> Result<(), RpcError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(RpcError::CustomError("node unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RpcConnection for MockRpc {
    fn new(_config: RpcConnectionConfig) -> Self {
        Self::default()
    }

    fn get_url(&self) -> String {
        "mock://ledger".to_string()
    }

    fn set_rpc_rate_limiter(&mut self, rate_limiter: RateLimiter) {
        self.rate_limiter = Some(rate_limiter);
    }

    fn rpc_rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref()
    }

    async fn health(&self) -> Result<(), RpcError> {
        Ok(())
    }

    async fn get_account(&self, address: Pubkey) -> Result<Option<Account>, RpcError> {
        self.record(RpcCall::GetAccount(address))?;
        Ok(self.accounts.get(&address).cloned())
    }

    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, RpcError> {
        self.record(RpcCall::GetMultipleAccounts(addresses.to_vec()))?;
        let mut accounts: Vec<_> = addresses
            .iter()
            .map(|address| self.accounts.get(address).cloned())
            .collect();
        if self.drop_last_entry {
            accounts.pop();
        }
        Ok(accounts)
    }

    async fn get_program_accounts_with_filters(
        &self,
        program_id: &Pubkey,
        filters: &[MemcmpFilter],
        data_slice: Option<DataSlice>,
    ) -> Result<Vec<(Pubkey, Account)>, RpcError> {
        self.record(RpcCall::GetProgramAccounts {
            filters: filters.to_vec(),
            data_slice,
        })?;
        Ok(self
            .accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| filters.iter().all(|f| f.matches(&account.data)))
            .map(|(address, account)| {
                let mut account = account.clone();
                if let Some(slice) = data_slice {
                    account.data = slice.apply(&account.data);
                }
                (*address, account)
            })
            .collect())
    }
}

/// Serializes `account` the way the program stores it.
pub fn account_data<T: AccountKind + BorshSerialize>(account: &T) -> Vec<u8> {
    let mut data = T::DISCRIMINATOR.to_vec();
    data.extend(account.try_to_vec().unwrap());
    data
}

/// A record of kind `T` with every field zeroed.
pub fn zeroed<T: AccountKind>() -> T {
    T::decode(&vec![0u8; T::LEN]).unwrap()
}

pub fn margin_account(
    owner: Pubkey,
    position_sizes: &[i64],
    in_liquidation: bool,
) -> MarginAccount {
    let mut account = zeroed::<MarginAccount>();
    account.owner = owner;
    account.margin = 2_500_000;
    for (position, size) in account.positions.iter_mut().zip(position_sizes) {
        *position = Position {
            size: *size,
            market_id: 1,
            ..*position
        };
    }
    account.in_liquidation = u8::from(in_liquidation);
    account
}

pub fn key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

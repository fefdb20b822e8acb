use parcl_v3_accounts::AccountLayoutError;
use pyth_sdk_solana::{PriceFeed, PythError};
use solana_sdk::pubkey::Pubkey;

/// A decoded account together with the address it is stored at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramAccount<T> {
    pub address: Pubkey,
    pub account: T,
}

/// One position of a batched fetch: `Ok(None)` if no account exists at the
/// requested address, `Err` if its data does not decode as the requested kind.
pub type AccountSlot<T> = Result<Option<ProgramAccount<T>>, AccountLayoutError>;

/// One position of a batched price feed fetch, `Err` if the account is not a
/// Pyth price account.
pub type PriceFeedSlot = Result<Option<ProgramAccount<PriceFeed>>, PythError>;

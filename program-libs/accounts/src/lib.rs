pub mod account_type;
pub mod constants;
pub mod discriminator;
pub mod error;
pub mod pda;
pub mod state;

pub use account_type::{AccountType, ParclAccount};
pub use discriminator::{AccountKind, AccountPayload, RawAccount, DISCRIMINATOR_LEN};
pub use error::AccountLayoutError;
pub use state::{
    Exchange, LpAccount, MarginAccount, Market, MarketAccounting, MarketSettings, Position,
    SettlementRequest,
};

solana_program::declare_id!("3parcLrT7WnXAcyPfkCz49oofuuf2guUKkjuFkAhZW8Y");

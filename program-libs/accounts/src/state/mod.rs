mod exchange;
mod lp_account;
mod margin_account;
mod market;
mod settlement_request;

pub use exchange::Exchange;
pub use lp_account::LpAccount;
pub use margin_account::{MarginAccount, Position, MAX_POSITIONS};
pub use market::{Market, MarketAccounting, MarketSettings};
pub use settlement_request::SettlementRequest;

pub const EXCHANGE_SEED: &[u8] = b"exchange";
pub const MARKET_SEED: &[u8] = b"market";
pub const MARGIN_ACCOUNT_SEED: &[u8] = b"margin_account";
pub const LP_ACCOUNT_SEED: &[u8] = b"lp_account";
pub const SETTLEMENT_REQUEST_SEED: &[u8] = b"settlement_request";

/// Upper bound used by tooling when searching settlement request ids.
pub const DEFAULT_SETTLEMENT_REQUEST_SEARCH_BOUND: u64 = 100_000;

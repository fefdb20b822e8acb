use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::discriminator::AccountKind;

pub const MAX_MARKETS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Exchange {
    pub market_ids: [u32; MAX_MARKETS],
    pub collateral_mint: Pubkey,
    pub collateral_vault: Pubkey,
    pub admin: Pubkey,
    pub nominated_admin: Pubkey,
    pub authorized_settler: Pubkey,
    pub authorized_protocol_fees_collector: Pubkey,
    pub id: u64,
    pub protocol_fees: u64,
    /// Seconds a settlement request waits before it can be processed.
    pub settlement_delay: u64,
    pub lp_shares: u64,
    pub lp_liquidity: u64,
    /// Decimal exponent of the collateral mint, negative.
    pub collateral_expo: i32,
    pub status: u16,
    pub bump: u8,
    pub _padding: [u8; 1],
    pub _reserved: [u8; 64],
}

impl AccountKind for Exchange {
    const NAME: &'static str = "Exchange";
    const DISCRIMINATOR: [u8; 8] = [30, 200, 220, 149, 3, 61, 104, 50];
    const LEN: usize = 432;
}

impl Exchange {
    /// Market ids in use. Unused slots hold zero.
    pub fn active_market_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.market_ids.iter().copied().filter(|id| *id != 0)
    }
}

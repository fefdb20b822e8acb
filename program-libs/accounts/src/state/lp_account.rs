use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::discriminator::AccountKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LpAccount {
    pub liquidity: u64,
    pub shares: u64,
    pub last_add_liquidity_timestamp: i64,
    pub exchange: Pubkey,
    pub owner: Pubkey,
    pub delegate: Pubkey,
    pub bump: u8,
    pub _padding: [u8; 7],
}

impl AccountKind for LpAccount {
    const NAME: &'static str = "LpAccount";
    const DISCRIMINATOR: [u8; 8] = [23, 166, 251, 222, 23, 27, 215, 48];
    const LEN: usize = 128;
}

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::discriminator::AccountKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SettlementRequest {
    pub id: u64,
    /// Unix timestamp after which the request can be settled.
    pub maturity: i64,
    pub amount: u64,
    pub keeper_tip: u64,
    pub exchange: Pubkey,
    pub owner: Pubkey,
    pub bump: u8,
    pub _padding: [u8; 7],
}

impl AccountKind for SettlementRequest {
    const NAME: &'static str = "SettlementRequest";
    const DISCRIMINATOR: [u8; 8] = [140, 131, 219, 225, 201, 122, 84, 250];
    const LEN: usize = 104;
}

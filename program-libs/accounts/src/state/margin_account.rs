use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::discriminator::AccountKind;

pub const MAX_POSITIONS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Position {
    /// Signed position size, zero for an empty slot.
    pub size: i64,
    pub last_interaction_price: u64,
    pub last_interaction_funding_per_unit: i128,
    pub market_id: u32,
    pub _padding: [u8; 28],
}

impl Position {
    pub const LEN: usize = 64;

    pub fn is_open(&self) -> bool {
        self.size != 0
    }
}

// positions        768 @ 0
// margin             8 @ 768
// max_liq_fee        8 @ 776
// id                 4 @ 784
// exchange          32 @ 788
// owner             32 @ 820
// delegate          32 @ 852
// in_liquidation     1 @ 884
// bump               1 @ 885
// padding           10 @ 886
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MarginAccount {
    pub positions: [Position; MAX_POSITIONS],
    pub margin: u64,
    pub max_liquidation_fee: u64,
    pub id: u32,
    pub exchange: Pubkey,
    pub owner: Pubkey,
    pub delegate: Pubkey,
    pub in_liquidation: u8,
    pub bump: u8,
    pub _padding: [u8; 10],
}

impl AccountKind for MarginAccount {
    const NAME: &'static str = "MarginAccount";
    const DISCRIMINATOR: [u8; 8] = [133, 220, 173, 213, 179, 211, 43, 238];
    const LEN: usize = 896;
}

impl MarginAccount {
    /// Payload offset of `in_liquidation`. Raw account offset is this plus the
    /// discriminator length.
    pub const IN_LIQUIDATION_OFFSET: usize = Position::LEN * MAX_POSITIONS + 8 + 8 + 4 + 32 * 3;

    pub fn is_in_liquidation(&self) -> bool {
        self.in_liquidation != 0
    }

    /// Returns true if any position slot holds a positive size.
    pub fn has_positions(&self) -> bool {
        self.positions.iter().any(|position| position.size > 0)
    }

    pub fn open_positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().filter(|position| position.is_open())
    }
}

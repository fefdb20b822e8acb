use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::discriminator::AccountKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MarketSettings {
    pub min_position_margin: u64,
    pub skew_scale: u64,
    pub max_side_size: u64,
    pub max_liquidation_limit_accumulation_multiplier: u64,
    pub max_seconds_in_liquidation_epoch: u64,
    pub initial_margin_ratio: u32,
    pub maker_fee_rate: u16,
    pub taker_fee_rate: u16,
    pub max_funding_velocity: u32,
    pub liquidation_fee_rate: u16,
    pub min_initial_margin_ratio: u16,
    pub maintenance_margin_proportion: u16,
    pub max_liquidation_pd: u16,
    pub authorized_liquidator: Pubkey,
    pub _padding: [u8; 4],
}

impl MarketSettings {
    pub const LEN: usize = 96;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MarketAccounting {
    pub weighted_position_price: u128,
    pub last_utilized_liquidation_capacity: u128,
    pub size: u64,
    pub skew: i64,
    pub last_funding_rate: i128,
    pub last_funding_per_unit: i128,
    pub last_time_funding_updated: i64,
    pub first_liquidation_epoch_start_time: i64,
    pub last_liquidation_epoch_index: u64,
    pub last_time_liquidation_capacity_updated: i64,
}

impl MarketAccounting {
    pub const LEN: usize = 112;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Market {
    pub settings: MarketSettings,
    pub accounting: MarketAccounting,
    pub exchange: Pubkey,
    pub price_feed: Pubkey,
    pub id: u32,
    pub status: u16,
    pub version: u8,
    pub bump: u8,
    pub _reserved: [u8; 32],
}

impl AccountKind for Market {
    const NAME: &'static str = "Market";
    const DISCRIMINATOR: [u8; 8] = [219, 190, 213, 55, 0, 227, 198, 154];
    const LEN: usize = MarketSettings::LEN + MarketAccounting::LEN + 32 + 32 + 4 + 2 + 1 + 1 + 32;
}

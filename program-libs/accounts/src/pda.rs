use solana_program::pubkey::Pubkey;

use crate::{
    constants::{
        EXCHANGE_SEED, LP_ACCOUNT_SEED, MARGIN_ACCOUNT_SEED, MARKET_SEED, SETTLEMENT_REQUEST_SEED,
    },
    ID,
};

pub fn exchange_pda(id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EXCHANGE_SEED, &id.to_le_bytes()], &ID)
}

pub fn market_pda(exchange: &Pubkey, id: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MARKET_SEED, exchange.as_ref(), &id.to_le_bytes()], &ID)
}

pub fn margin_account_pda(exchange: &Pubkey, owner: &Pubkey, id: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            MARGIN_ACCOUNT_SEED,
            exchange.as_ref(),
            owner.as_ref(),
            &id.to_le_bytes(),
        ],
        &ID,
    )
}

pub fn lp_account_pda(exchange: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_ACCOUNT_SEED, exchange.as_ref(), owner.as_ref()], &ID)
}

pub fn settlement_request_pda(owner: &Pubkey, id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SETTLEMENT_REQUEST_SEED, owner.as_ref(), &id.to_le_bytes()],
        &ID,
    )
}

/// Candidate id together with the address derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationCandidate {
    pub id: u64,
    pub address: Pubkey,
}

/// Walks ids `0..bound` in ascending order and returns the first one whose
/// derived address equals `target`.
///
/// Derivation is one way, so this costs one `derive` call per candidate.
/// Returns `None` once the bound is exhausted.
pub fn reverse_search<F>(target: &Pubkey, bound: u64, mut derive: F) -> Option<DerivationCandidate>
where
    F: FnMut(u64) -> Pubkey,
{
    (0..bound)
        .map(|id| DerivationCandidate {
            id,
            address: derive(id),
        })
        .find(|candidate| candidate.address == *target)
}

/// Recovers the id of the settlement request at `target` owned by `owner`.
pub fn find_settlement_request_id(owner: &Pubkey, target: &Pubkey, bound: u64) -> Option<u64> {
    reverse_search(target, bound, |id| settlement_request_pda(owner, id).0)
        .map(|candidate| candidate.id)
}

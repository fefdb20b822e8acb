use std::fmt::Debug;

use borsh::BorshSerialize;
use parcl_v3_accounts::{
    AccountKind, AccountLayoutError, AccountType, Exchange, LpAccount, MarginAccount, Market,
    MarketAccounting, MarketSettings, ParclAccount, Position, SettlementRequest,
    DISCRIMINATOR_LEN,
};
use rand::Rng;
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;

fn random_payload(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

fn with_discriminator<T: AccountKind>(payload: &[u8]) -> Vec<u8> {
    let mut data = T::DISCRIMINATOR.to_vec();
    data.extend_from_slice(payload);
    data
}

fn sample_position(market_id: u32, size: i64) -> Position {
    Position {
        size,
        last_interaction_price: 1_250_000,
        last_interaction_funding_per_unit: -42,
        market_id,
        _padding: [0; 28],
    }
}

fn sample_margin_account() -> MarginAccount {
    let mut positions = [sample_position(0, 0); 12];
    positions[3] = sample_position(4, 100_000);
    MarginAccount {
        positions,
        margin: 5_100_000,
        max_liquidation_fee: 10_000,
        id: 2,
        exchange: Pubkey::new_from_array([1; 32]),
        owner: Pubkey::new_from_array([2; 32]),
        delegate: Pubkey::default(),
        in_liquidation: 1,
        bump: 254,
        _padding: [0; 10],
    }
}

fn sample_exchange() -> Exchange {
    let mut market_ids = [0u32; 32];
    market_ids[0] = 4;
    market_ids[1] = 7;
    Exchange {
        market_ids,
        collateral_mint: Pubkey::new_from_array([3; 32]),
        collateral_vault: Pubkey::new_from_array([4; 32]),
        admin: Pubkey::new_from_array([5; 32]),
        nominated_admin: Pubkey::default(),
        authorized_settler: Pubkey::new_from_array([6; 32]),
        authorized_protocol_fees_collector: Pubkey::new_from_array([7; 32]),
        id: 0,
        protocol_fees: 12,
        settlement_delay: 60,
        lp_shares: 1_000,
        lp_liquidity: 2_000,
        collateral_expo: -6,
        status: 0,
        bump: 255,
        _padding: [0],
        _reserved: [0; 64],
    }
}

fn sample_market() -> Market {
    Market {
        settings: MarketSettings {
            min_position_margin: 1,
            skew_scale: 2,
            max_side_size: 3,
            max_liquidation_limit_accumulation_multiplier: 4,
            max_seconds_in_liquidation_epoch: 5,
            initial_margin_ratio: 6,
            maker_fee_rate: 7,
            taker_fee_rate: 8,
            max_funding_velocity: 9,
            liquidation_fee_rate: 10,
            min_initial_margin_ratio: 11,
            maintenance_margin_proportion: 12,
            max_liquidation_pd: 13,
            authorized_liquidator: Pubkey::new_from_array([8; 32]),
            _padding: [0; 4],
        },
        accounting: MarketAccounting {
            weighted_position_price: u128::MAX,
            last_utilized_liquidation_capacity: 1,
            size: 2,
            skew: -3,
            last_funding_rate: i128::MIN,
            last_funding_per_unit: 5,
            last_time_funding_updated: 6,
            first_liquidation_epoch_start_time: 7,
            last_liquidation_epoch_index: 8,
            last_time_liquidation_capacity_updated: 9,
        },
        exchange: Pubkey::new_from_array([1; 32]),
        price_feed: Pubkey::new_from_array([9; 32]),
        id: 4,
        status: 1,
        version: 1,
        bump: 253,
        _reserved: [0; 32],
    }
}

fn sample_lp_account() -> LpAccount {
    LpAccount {
        liquidity: 10,
        shares: 20,
        last_add_liquidity_timestamp: 1_700_000_000,
        exchange: Pubkey::new_from_array([1; 32]),
        owner: Pubkey::new_from_array([2; 32]),
        delegate: Pubkey::default(),
        bump: 250,
        _padding: [0; 7],
    }
}

fn sample_settlement_request() -> SettlementRequest {
    SettlementRequest {
        id: 17,
        maturity: 1_700_000_600,
        amount: 99,
        keeper_tip: 1,
        exchange: Pubkey::new_from_array([1; 32]),
        owner: Pubkey::new_from_array([2; 32]),
        bump: 251,
        _padding: [0; 7],
    }
}

fn assert_layout_len<T: AccountKind + BorshSerialize + PartialEq + Debug>(record: T) {
    let bytes = record.try_to_vec().unwrap();
    assert_eq!(bytes.len(), T::LEN, "{} layout size", T::NAME);
    assert_eq!(T::decode(&bytes).unwrap(), record);
}

fn assert_length_checked<T: AccountKind + Debug>() {
    let short = random_payload(T::LEN - 1);
    match T::decode(&short) {
        Err(AccountLayoutError::MalformedRecord {
            kind,
            expected,
            actual,
        }) => {
            assert_eq!(kind, T::NAME);
            assert_eq!(expected, T::LEN);
            assert_eq!(actual, T::LEN - 1);
        }
        other => panic!("expected MalformedRecord for {}, got {:?}", T::NAME, other),
    }
    let long = random_payload(T::LEN + 1);
    assert!(T::decode(&long).unwrap_err().is_malformed_record());
    assert!(T::decode(&[]).unwrap_err().is_malformed_record());
}

fn assert_decode_deterministic<T: AccountKind + PartialEq + Debug>() {
    let payload = random_payload(T::LEN);
    let first = T::decode(&payload).unwrap();
    let second = T::decode(&payload).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_layout_sizes_match_serialized_records() {
    assert_layout_len(sample_exchange());
    assert_layout_len(sample_market());
    assert_layout_len(sample_margin_account());
    assert_layout_len(sample_lp_account());
    assert_layout_len(sample_settlement_request());
    assert_eq!(sample_position(1, 1).try_to_vec().unwrap().len(), Position::LEN);
    assert_eq!(
        sample_market().settings.try_to_vec().unwrap().len(),
        MarketSettings::LEN
    );
    assert_eq!(
        sample_market().accounting.try_to_vec().unwrap().len(),
        MarketAccounting::LEN
    );
}

#[test]
fn test_decode_rejects_off_by_one_lengths() {
    assert_length_checked::<Exchange>();
    assert_length_checked::<Market>();
    assert_length_checked::<MarginAccount>();
    assert_length_checked::<LpAccount>();
    assert_length_checked::<SettlementRequest>();
}

#[test]
fn test_account_type_payload_len_selects_layout() {
    for account_type in AccountType::ALL {
        let payload = random_payload(account_type.payload_len());
        let account = ParclAccount::decode_payload(account_type, &payload).unwrap();
        assert_eq!(account.account_type(), account_type);

        let short = &payload[..payload.len() - 1];
        let err = ParclAccount::decode_payload(account_type, short).unwrap_err();
        assert!(err.is_malformed_record(), "{account_type}");
    }
}

#[test]
fn test_decode_is_deterministic() {
    for _ in 0..10 {
        assert_decode_deterministic::<Exchange>();
        assert_decode_deterministic::<Market>();
        assert_decode_deterministic::<MarginAccount>();
        assert_decode_deterministic::<LpAccount>();
        assert_decode_deterministic::<SettlementRequest>();
    }
}

#[test]
fn test_fields_are_little_endian_at_fixed_offsets() {
    let request = sample_settlement_request();
    let bytes = request.try_to_vec().unwrap();
    assert_eq!(&bytes[0..8], &17u64.to_le_bytes());
    assert_eq!(&bytes[8..16], &1_700_000_600i64.to_le_bytes());
    assert_eq!(&bytes[32..64], request.exchange.as_ref());
    assert_eq!(bytes[96], 251);

    let exchange = sample_exchange();
    let bytes = exchange.try_to_vec().unwrap();
    assert_eq!(&bytes[4..8], &7u32.to_le_bytes());
    assert_eq!(&bytes[360..364], &(-6i32).to_le_bytes());
}

#[test]
fn test_in_liquidation_offset() {
    assert_eq!(MarginAccount::IN_LIQUIDATION_OFFSET, 884);
    let bytes = sample_margin_account().try_to_vec().unwrap();
    assert_eq!(bytes[MarginAccount::IN_LIQUIDATION_OFFSET], 1);
    // bump follows the flag
    assert_eq!(bytes[MarginAccount::IN_LIQUIDATION_OFFSET + 1], 254);
}

#[test]
fn test_margin_account_helpers() {
    let mut account = sample_margin_account();
    assert!(account.has_positions());
    assert!(account.is_in_liquidation());
    assert_eq!(account.open_positions().count(), 1);

    account.positions[3].size = -5;
    assert!(!account.has_positions());
    assert_eq!(account.open_positions().count(), 1);
}

#[test]
fn test_discriminators_follow_anchor_scheme() {
    for account_type in AccountType::ALL {
        let hash = Sha256::digest(format!("account:{}", account_type.name()).as_bytes());
        assert_eq!(
            account_type.discriminator().as_slice(),
            &hash[..DISCRIMINATOR_LEN],
            "{}",
            account_type
        );
    }
}

#[test]
fn test_discriminators_are_unique() {
    for (i, a) in AccountType::ALL.iter().enumerate() {
        for b in AccountType::ALL.iter().skip(i + 1) {
            assert_ne!(a.discriminator(), b.discriminator());
        }
        assert_eq!(AccountType::from_discriminator(&a.discriminator()), Some(*a));
    }
    assert_eq!(AccountType::from_discriminator(&[0; 8]), None);
    assert_eq!(AccountType::from_discriminator(&[0; 4]), None);
}

#[test]
fn test_parcl_account_dispatches_on_discriminator() {
    let market = sample_market();
    let data = with_discriminator::<Market>(&market.try_to_vec().unwrap());
    assert_eq!(ParclAccount::decode(&data).unwrap(), ParclAccount::Market(market));

    let margin_account = sample_margin_account();
    let data = with_discriminator::<MarginAccount>(&margin_account.try_to_vec().unwrap());
    let decoded = ParclAccount::decode(&data).unwrap();
    assert_eq!(decoded.account_type(), AccountType::MarginAccount);
    assert_eq!(decoded, ParclAccount::MarginAccount(Box::new(margin_account)));
}

#[test]
fn test_parcl_account_rejects_unknown_and_short_data() {
    let mut data = vec![0u8; 8];
    data.extend_from_slice(&random_payload(Exchange::LEN));
    assert!(matches!(
        ParclAccount::decode(&data),
        Err(AccountLayoutError::UnknownDiscriminator(tag)) if tag == [0u8; 8]
    ));
    assert!(matches!(
        ParclAccount::decode(&[1, 2, 3]),
        Err(AccountLayoutError::MissingDiscriminator(3))
    ));

    // Right tag, truncated body.
    let data = with_discriminator::<LpAccount>(&random_payload(LpAccount::LEN - 8));
    let err = ParclAccount::decode(&data).unwrap_err();
    assert!(err.is_malformed_record());
}

#[test]
fn test_foreign_kind_with_different_size_is_malformed() {
    let payload = sample_exchange().try_to_vec().unwrap();
    let err = Market::decode(&payload).unwrap_err();
    assert!(matches!(
        err,
        AccountLayoutError::MalformedRecord {
            kind: "Market",
            expected: 312,
            actual: 432,
        }
    ));
}

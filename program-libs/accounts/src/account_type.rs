use std::fmt::{Display, Formatter};

use crate::{
    discriminator::{split_discriminator, AccountKind, DISCRIMINATOR_LEN},
    error::AccountLayoutError,
    state::{Exchange, LpAccount, MarginAccount, Market, SettlementRequest},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountType {
    Exchange,
    Market,
    MarginAccount,
    LpAccount,
    SettlementRequest,
}

const ACCOUNT_TYPES: [(AccountType, [u8; DISCRIMINATOR_LEN]); 5] = [
    (AccountType::Exchange, Exchange::DISCRIMINATOR),
    (AccountType::Market, Market::DISCRIMINATOR),
    (AccountType::MarginAccount, MarginAccount::DISCRIMINATOR),
    (AccountType::LpAccount, LpAccount::DISCRIMINATOR),
    (AccountType::SettlementRequest, SettlementRequest::DISCRIMINATOR),
];

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Exchange,
        AccountType::Market,
        AccountType::MarginAccount,
        AccountType::LpAccount,
        AccountType::SettlementRequest,
    ];

    /// Looks up the account type whose discriminator prefixes `data`.
    pub fn from_discriminator(data: &[u8]) -> Option<Self> {
        let tag = data.get(..DISCRIMINATOR_LEN)?;
        ACCOUNT_TYPES
            .iter()
            .find(|(_, discriminator)| discriminator.as_slice() == tag)
            .map(|(account_type, _)| *account_type)
    }

    pub fn discriminator(self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            AccountType::Exchange => Exchange::DISCRIMINATOR,
            AccountType::Market => Market::DISCRIMINATOR,
            AccountType::MarginAccount => MarginAccount::DISCRIMINATOR,
            AccountType::LpAccount => LpAccount::DISCRIMINATOR,
            AccountType::SettlementRequest => SettlementRequest::DISCRIMINATOR,
        }
    }

    pub fn payload_len(self) -> usize {
        match self {
            AccountType::Exchange => Exchange::LEN,
            AccountType::Market => Market::LEN,
            AccountType::MarginAccount => MarginAccount::LEN,
            AccountType::LpAccount => LpAccount::LEN,
            AccountType::SettlementRequest => SettlementRequest::LEN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AccountType::Exchange => Exchange::NAME,
            AccountType::Market => Market::NAME,
            AccountType::MarginAccount => MarginAccount::NAME,
            AccountType::LpAccount => LpAccount::NAME,
            AccountType::SettlementRequest => SettlementRequest::NAME,
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Any account owned by the program, resolved through its discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParclAccount {
    Exchange(Exchange),
    Market(Market),
    MarginAccount(Box<MarginAccount>),
    LpAccount(LpAccount),
    SettlementRequest(SettlementRequest),
}

impl ParclAccount {
    /// Decodes raw account data, discriminator included, selecting the layout
    /// from the leading tag.
    pub fn decode(data: &[u8]) -> Result<Self, AccountLayoutError> {
        let (discriminator, payload) = split_discriminator(data)?;
        let account_type = AccountType::from_discriminator(&discriminator)
            .ok_or(AccountLayoutError::UnknownDiscriminator(discriminator))?;
        Self::decode_payload(account_type, payload)
    }

    pub fn decode_payload(
        account_type: AccountType,
        payload: &[u8],
    ) -> Result<Self, AccountLayoutError> {
        Ok(match account_type {
            AccountType::Exchange => ParclAccount::Exchange(Exchange::decode(payload)?),
            AccountType::Market => ParclAccount::Market(Market::decode(payload)?),
            AccountType::MarginAccount => {
                ParclAccount::MarginAccount(Box::new(MarginAccount::decode(payload)?))
            }
            AccountType::LpAccount => ParclAccount::LpAccount(LpAccount::decode(payload)?),
            AccountType::SettlementRequest => {
                ParclAccount::SettlementRequest(SettlementRequest::decode(payload)?)
            }
        })
    }

    pub fn account_type(&self) -> AccountType {
        match self {
            ParclAccount::Exchange(_) => AccountType::Exchange,
            ParclAccount::Market(_) => AccountType::Market,
            ParclAccount::MarginAccount(_) => AccountType::MarginAccount,
            ParclAccount::LpAccount(_) => AccountType::LpAccount,
            ParclAccount::SettlementRequest(_) => AccountType::SettlementRequest,
        }
    }
}

use borsh::BorshDeserialize;
use solana_program::pubkey::Pubkey;

use crate::error::AccountLayoutError;

pub const DISCRIMINATOR_LEN: usize = 8;

/// A record kind stored by the program.
///
/// Every account is laid out as `[discriminator][payload]` where the payload is
/// exactly `LEN` bytes of little-endian fields with no length prefixes.
pub trait AccountKind: BorshDeserialize + Sized {
    const NAME: &'static str;
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];
    /// Payload size, excluding the discriminator.
    const LEN: usize;

    /// Size of the whole account, discriminator included.
    fn account_size() -> usize {
        DISCRIMINATOR_LEN + Self::LEN
    }

    /// Decodes a payload that has already been stripped of its discriminator.
    ///
    /// The payload length must match `LEN` exactly. A payload of another kind
    /// with the same length decodes into garbage, the caller asserts the kind.
    fn decode(payload: &[u8]) -> Result<Self, AccountLayoutError> {
        if payload.len() != Self::LEN {
            return Err(AccountLayoutError::MalformedRecord {
                kind: Self::NAME,
                expected: Self::LEN,
                actual: payload.len(),
            });
        }
        Self::try_from_slice(payload).map_err(|source| AccountLayoutError::Deserialize {
            kind: Self::NAME,
            source,
        })
    }
}

/// Splits raw account data into its discriminator and payload.
pub fn split_discriminator(
    data: &[u8],
) -> Result<([u8; DISCRIMINATOR_LEN], &[u8]), AccountLayoutError> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(AccountLayoutError::MissingDiscriminator(data.len()));
    }
    let (discriminator, payload) = data.split_at(DISCRIMINATOR_LEN);
    let mut tag = [0u8; DISCRIMINATOR_LEN];
    tag.copy_from_slice(discriminator);
    Ok((tag, payload))
}

/// Account as returned by the transport. `data` is `None` when no account
/// exists at `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAccount {
    pub address: Pubkey,
    pub data: Option<Vec<u8>>,
}

impl RawAccount {
    pub fn new(address: Pubkey, data: Option<Vec<u8>>) -> Self {
        Self { address, data }
    }

    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    /// Returns a view over the payload following the discriminator, or `None`
    /// if the account does not exist. The discriminator is not checked against
    /// any kind.
    pub fn strip_discriminator(&self) -> Result<Option<AccountPayload<'_>>, AccountLayoutError> {
        match self.data.as_deref() {
            None => Ok(None),
            Some(data) => AccountPayload::new(self.address, data).map(Some),
        }
    }
}

/// Read-only window over an account's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPayload<'a> {
    pub address: Pubkey,
    pub discriminator: [u8; DISCRIMINATOR_LEN],
    pub data: &'a [u8],
}

impl<'a> AccountPayload<'a> {
    pub fn new(address: Pubkey, data: &'a [u8]) -> Result<Self, AccountLayoutError> {
        let (discriminator, data) = split_discriminator(data)?;
        Ok(Self {
            address,
            discriminator,
            data,
        })
    }

    pub fn decode<T: AccountKind>(&self) -> Result<T, AccountLayoutError> {
        T::decode(self.data)
    }
}

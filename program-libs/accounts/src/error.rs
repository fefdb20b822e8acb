use thiserror::Error;

use crate::discriminator::DISCRIMINATOR_LEN;

#[derive(Debug, Error)]
pub enum AccountLayoutError {
    #[error("Malformed {kind} record: expected {expected} bytes, got {actual}")]
    MalformedRecord {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error(
        "Account data of {0} bytes is too short to hold a {len} byte discriminator",
        len = DISCRIMINATOR_LEN
    )]
    MissingDiscriminator(usize),
    #[error("Unknown account discriminator {0:?}")]
    UnknownDiscriminator([u8; DISCRIMINATOR_LEN]),
    #[error("Failed to deserialize {kind}: {source}")]
    Deserialize {
        kind: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl AccountLayoutError {
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, AccountLayoutError::MalformedRecord { .. })
    }
}

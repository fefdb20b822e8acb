use solana_account_decoder::UiDataSliceConfig;
use solana_rpc_client_api::filter::{Memcmp, RpcFilterType};

/// Byte equality predicate at a fixed offset of the raw account data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemcmpFilter {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl MemcmpFilter {
    pub fn new(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
        }
    }

    /// Matches accounts whose leading bytes equal `discriminator`.
    pub fn discriminator(discriminator: &[u8]) -> Self {
        Self::new(0, discriminator)
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        data.get(self.offset..self.offset + self.bytes.len()) == Some(self.bytes.as_slice())
    }
}

impl From<MemcmpFilter> for RpcFilterType {
    fn from(filter: MemcmpFilter) -> Self {
        RpcFilterType::Memcmp(Memcmp::new_raw_bytes(filter.offset, filter.bytes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSlice {
    pub offset: usize,
    pub length: usize,
}

impl DataSlice {
    /// Requests no account data at all.
    pub const EMPTY: DataSlice = DataSlice {
        offset: 0,
        length: 0,
    };

    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        let start = self.offset.min(data.len());
        let end = self.offset.saturating_add(self.length).min(data.len());
        data[start..end].to_vec()
    }
}

impl From<DataSlice> for UiDataSliceConfig {
    fn from(slice: DataSlice) -> Self {
        UiDataSliceConfig {
            offset: slice.offset,
            length: slice.length,
        }
    }
}

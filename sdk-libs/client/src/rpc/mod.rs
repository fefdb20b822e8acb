pub mod errors;
pub mod filters;
mod rpc_connection;
pub mod solana_rpc;

pub use errors::RpcError;
pub use filters::{DataSlice, MemcmpFilter};
pub use rpc_connection::{RpcConnection, RpcConnectionConfig};
pub use solana_rpc::{RetryConfig, SolanaRpcConnection, SolanaRpcUrl};

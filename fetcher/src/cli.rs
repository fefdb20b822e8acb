use clap::{Args, Parser, Subcommand, ValueEnum};
use parcl_v3_accounts::{constants::DEFAULT_SETTLEMENT_REQUEST_SEARCH_BOUND, AccountType};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub rpc: RpcArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch accounts by address. Without --kind the layout is picked from
    /// each account's discriminator.
    Get(GetArgs),
    /// List every account of one kind.
    Scan(ScanArgs),
    /// List margin accounts flagged for liquidation.
    InLiquidation(InLiquidationArgs),
    /// List margin accounts holding at least one position.
    WithPositions,
    /// Recover the id a settlement request address was derived from.
    FindSettlementRequestId(FindSettlementRequestIdArgs),
    /// Read Pyth price feeds, directly or through the markets using them.
    PriceFeed(PriceFeedArgs),
}

#[derive(Args, Clone, Debug)]
pub struct RpcArgs {
    #[arg(
        long,
        env = "PARCL_RPC_URL",
        default_value = "https://api.mainnet-beta.solana.com"
    )]
    pub rpc_url: String,

    #[arg(long, env = "PARCL_COMMITMENT", value_enum, default_value = "confirmed")]
    pub commitment: Commitment,

    #[arg(long, env = "PARCL_MAX_RETRIES", default_value = "30")]
    pub max_retries: u32,

    #[arg(long, env = "PARCL_RETRY_DELAY_MS", default_value = "1000")]
    pub retry_delay_ms: u64,

    #[arg(long, env = "PARCL_RETRY_TIMEOUT_MS", default_value = "60000")]
    pub retry_timeout_ms: u64,

    /// Unlimited when unset.
    #[arg(long, env = "PARCL_RPC_REQUESTS_PER_SECOND")]
    pub rpc_requests_per_second: Option<u32>,

    /// Wait between consecutive requests of a per-slot scan.
    #[arg(long, env = "PARCL_SCAN_DELAY_SECS", default_value = "9")]
    pub scan_delay_secs: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Exchange,
    Market,
    MarginAccount,
    LpAccount,
    SettlementRequest,
}

impl From<Kind> for AccountType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Exchange => AccountType::Exchange,
            Kind::Market => AccountType::Market,
            Kind::MarginAccount => AccountType::MarginAccount,
            Kind::LpAccount => AccountType::LpAccount,
            Kind::SettlementRequest => AccountType::SettlementRequest,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct GetArgs {
    #[arg(long, value_enum)]
    pub kind: Option<Kind>,

    #[arg(required = true)]
    pub addresses: Vec<Pubkey>,
}

#[derive(Args, Clone, Debug)]
pub struct ScanArgs {
    #[arg(long, value_enum)]
    pub kind: Kind,

    /// Only list addresses, no account data is transferred.
    #[arg(long)]
    pub addresses_only: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// One scan, liquidation flag checked locally.
    #[default]
    DecodeAll,
    /// One filtered scan per slot.
    PerSlot,
}

#[derive(Args, Clone, Debug)]
pub struct InLiquidationArgs {
    #[arg(long, value_enum, default_value = "decode-all")]
    pub strategy: Strategy,

    /// Number of flag offsets scanned with --strategy per-slot.
    #[arg(long, default_value = "1")]
    pub slots: usize,

    /// Bytes between consecutive flag offsets. Defaults to the position size.
    #[arg(long)]
    pub stride: Option<usize>,
}

#[derive(Args, Clone, Debug)]
pub struct FindSettlementRequestIdArgs {
    #[arg(long)]
    pub owner: Pubkey,

    #[arg(long)]
    pub target: Pubkey,

    #[arg(long, default_value_t = DEFAULT_SETTLEMENT_REQUEST_SEARCH_BOUND)]
    pub bound: u64,
}

#[derive(Args, Clone, Debug)]
pub struct PriceFeedArgs {
    /// Treat the addresses as markets and read their price feeds.
    #[arg(long)]
    pub market: bool,

    #[arg(required = true)]
    pub addresses: Vec<Pubkey>,
}

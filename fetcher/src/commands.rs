use std::fmt::Debug;

use anyhow::Context;
use parcl_v3_accounts::{
    pda::find_settlement_request_id, AccountKind, Exchange, LpAccount, MarginAccount, Market,
    Position, SettlementRequest,
};
use parcl_v3_client::{
    rpc::RpcConnection, LiquidationScanStrategy, ParclAccountFetcher, ProgramAccount,
    SubSlotScan,
};
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info, warn};

use crate::{
    cli::{
        Cli, Commands, FindSettlementRequestIdArgs, GetArgs, InLiquidationArgs, Kind,
        PriceFeedArgs, ScanArgs, Strategy,
    },
    config::FetcherConfig,
};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = FetcherConfig::from(&cli.rpc);
    debug!("{:?}", config);

    // Pure derivation, no connection needed.
    if let Commands::FindSettlementRequestId(args) = &cli.command {
        return find_settlement_request(args);
    }

    let fetcher = ParclAccountFetcher::new(config.connect());
    info!(
        "Reading program {} from {}",
        fetcher.program_id(),
        fetcher.rpc().get_url()
    );
    fetcher
        .rpc()
        .health()
        .await
        .with_context(|| format!("RPC node {} is unhealthy", fetcher.rpc().get_url()))?;

    match cli.command {
        Commands::Get(args) => get(&fetcher, &args).await,
        Commands::Scan(args) => scan(&fetcher, &args).await,
        Commands::InLiquidation(args) => in_liquidation(&fetcher, &config, &args).await,
        Commands::WithPositions => {
            let accounts = fetcher.get_all_margin_accounts_with_positions().await?;
            print_accounts(&accounts);
            Ok(())
        }
        Commands::FindSettlementRequestId(args) => find_settlement_request(&args),
        Commands::PriceFeed(args) => price_feed(&fetcher, &args).await,
    }
}

async fn get<R: RpcConnection>(
    fetcher: &ParclAccountFetcher<R>,
    args: &GetArgs,
) -> anyhow::Result<()> {
    let Some(kind) = args.kind else {
        for address in &args.addresses {
            match fetcher.get_any_account(*address).await? {
                Some(account) => println!("{}: {:#?}", address, account),
                None => println!("{}: not found", address),
            }
        }
        return Ok(());
    };
    match kind {
        Kind::Exchange => get_kind::<Exchange, R>(fetcher, &args.addresses).await,
        Kind::Market => get_kind::<Market, R>(fetcher, &args.addresses).await,
        Kind::MarginAccount => get_kind::<MarginAccount, R>(fetcher, &args.addresses).await,
        Kind::LpAccount => get_kind::<LpAccount, R>(fetcher, &args.addresses).await,
        Kind::SettlementRequest => {
            get_kind::<SettlementRequest, R>(fetcher, &args.addresses).await
        }
    }
}

async fn get_kind<T: AccountKind + Debug, R: RpcConnection>(
    fetcher: &ParclAccountFetcher<R>,
    addresses: &[Pubkey],
) -> anyhow::Result<()> {
    let slots = fetcher.get_accounts::<T>(addresses).await?;
    for (address, slot) in addresses.iter().zip(slots) {
        match slot {
            Ok(Some(account)) => println!("{}: {:#?}", address, account.account),
            Ok(None) => println!("{}: not found", address),
            Err(e) => warn!("{} is not a valid {}: {}", address, T::NAME, e),
        }
    }
    Ok(())
}

async fn scan<R: RpcConnection>(
    fetcher: &ParclAccountFetcher<R>,
    args: &ScanArgs,
) -> anyhow::Result<()> {
    match args.kind {
        Kind::Exchange => scan_kind::<Exchange, R>(fetcher, args.addresses_only).await,
        Kind::Market => scan_kind::<Market, R>(fetcher, args.addresses_only).await,
        Kind::MarginAccount => scan_kind::<MarginAccount, R>(fetcher, args.addresses_only).await,
        Kind::LpAccount => scan_kind::<LpAccount, R>(fetcher, args.addresses_only).await,
        Kind::SettlementRequest => {
            scan_kind::<SettlementRequest, R>(fetcher, args.addresses_only).await
        }
    }
}

async fn scan_kind<T: AccountKind + Debug, R: RpcConnection>(
    fetcher: &ParclAccountFetcher<R>,
    addresses_only: bool,
) -> anyhow::Result<()> {
    if addresses_only {
        let addresses = fetcher.get_all_addresses::<T>().await?;
        info!("Found {} {} accounts", addresses.len(), T::NAME);
        for address in addresses {
            println!("{}", address);
        }
    } else {
        let accounts = fetcher.get_all::<T>().await?;
        info!("Found {} {} accounts", accounts.len(), T::NAME);
        print_accounts(&accounts);
    }
    Ok(())
}

async fn in_liquidation<R: RpcConnection>(
    fetcher: &ParclAccountFetcher<R>,
    config: &FetcherConfig,
    args: &InLiquidationArgs,
) -> anyhow::Result<()> {
    let strategy = liquidation_strategy(config, args);
    let accounts = fetcher.get_in_liquidation_margin_accounts(&strategy).await?;
    print_accounts(&accounts);
    Ok(())
}

pub fn liquidation_strategy(
    config: &FetcherConfig,
    args: &InLiquidationArgs,
) -> LiquidationScanStrategy {
    match args.strategy {
        Strategy::DecodeAll => LiquidationScanStrategy::DecodeAll,
        Strategy::PerSlot => LiquidationScanStrategy::PerSlot {
            scan: SubSlotScan {
                slots: args.slots,
                stride: args.stride.unwrap_or(Position::LEN),
                ..SubSlotScan::margin_account_in_liquidation()
            },
            pacing: config.scan_pacing.clone(),
        },
    }
}

async fn price_feed<R: RpcConnection>(
    fetcher: &ParclAccountFetcher<R>,
    args: &PriceFeedArgs,
) -> anyhow::Result<()> {
    let feed_addresses = if args.market {
        market_price_feeds(fetcher, &args.addresses).await?
    } else {
        args.addresses.clone()
    };
    let slots = fetcher.get_price_feeds(&feed_addresses).await?;
    for (address, slot) in feed_addresses.iter().zip(slots) {
        match slot {
            Ok(Some(feed)) => println!("{}: {:#?}", address, feed.account),
            Ok(None) => println!("{}: not found", address),
            Err(e) => warn!("{} is not a price account: {}", address, e),
        }
    }
    Ok(())
}

async fn market_price_feeds<R: RpcConnection>(
    fetcher: &ParclAccountFetcher<R>,
    markets: &[Pubkey],
) -> anyhow::Result<Vec<Pubkey>> {
    let slots = fetcher.get_markets(markets).await?;
    let mut feeds = Vec::with_capacity(markets.len());
    for (address, slot) in markets.iter().zip(slots) {
        match slot {
            Ok(Some(market)) => feeds.push(market.account.price_feed),
            Ok(None) => warn!("Market {} not found", address),
            Err(e) => warn!("{} is not a valid {}: {}", address, Market::NAME, e),
        }
    }
    Ok(feeds)
}

fn find_settlement_request(args: &FindSettlementRequestIdArgs) -> anyhow::Result<()> {
    let id = find_settlement_request_id(&args.owner, &args.target, args.bound).with_context(
        || {
            format!(
                "{} is not a settlement request of {} with id below {}",
                args.target, args.owner, args.bound
            )
        },
    )?;
    println!("{}", id);
    Ok(())
}

fn print_accounts<T: Debug>(accounts: &[ProgramAccount<T>]) {
    for account in accounts {
        println!("{}: {:#?}", account.address, account.account);
    }
}

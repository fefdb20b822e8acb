use clap::Parser;
use parcl_fetcher::{run, telemetry::setup_telemetry, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local overrides take precedence over .env, neither is required.
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
    setup_telemetry();

    let cli = Cli::parse();
    run(cli).await
}

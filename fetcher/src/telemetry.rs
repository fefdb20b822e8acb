use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static INIT: Once = Once::new();

/// Installs the global subscriber. Logs go to stderr so that stdout only
/// carries fetched records.
pub fn setup_telemetry() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let stderr_layer = fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_filter(env_filter);

        tracing_subscriber::registry().with(stderr_layer).init();
    });
}

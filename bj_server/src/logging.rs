//! Structured logging configuration.
//!
//! The library logs through the `log` facade; `tracing-subscriber`
//! picks those records up through its `tracing-log` bridge.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize logging with levels configurable via `RUST_LOG`
///
/// # Example
///
/// ```no_run
/// use bj_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Dealer starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Log the effective configuration once at startup
pub fn log_startup(config: &ServerConfig) {
    let max_sessions = match config.dealer.max_sessions {
        0 => "unlimited".to_string(),
        n => n.to_string(),
    };
    tracing::info!(
        bind = %config.bind,
        shuffle = %config.dealer.shuffle,
        max_sessions = %max_sessions,
        seeded = config.dealer.seed.is_some(),
        "Starting blackjack dealer"
    );
    if let Some(seed) = config.dealer.seed {
        tracing::warn!(seed, "Deck seed set, every deal is reproducible");
    }
}

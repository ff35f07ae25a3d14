use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

const DEFAULT_FILTER: &str = "info";

/// Builds the log filter. `RUST_LOG` wins over the configured level.
pub fn env_filter(config: &Config) -> EnvFilter {
    let level = match config.debug.log_level.trim() {
        "" => DEFAULT_FILTER,
        level => level,
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Sets up console logging with timestamps and module paths. Call once, at
/// startup.
pub fn init_logging(config: &Config) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console_layer)
        .init();
}

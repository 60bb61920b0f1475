//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "JST_LOG";

static INIT: Once = Once::new();

/// Initialize logging from `JST_LOG`, falling back to
/// `jst_analysis=info,jst_core=info`.
///
/// Format: `JST_LOG=jst_analysis=trace,jst_core=warn`
///
/// Idempotent; only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with(&LogConfig::default());
}

/// Initialize logging from `JST_LOG`, falling back to the configured filter.
pub fn init_tracing_with(config: &LogConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(config.effective_filter()))
            .unwrap_or_else(|_| EnvFilter::new(crate::config::log_config::DEFAULT_FILTER));

        // Another subscriber may already be installed by the host binary.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

//! Logging setup.
//!
//! Output goes to stderr so log lines never land inside rendered tables.
//! `RUST_LOG` takes precedence over the configured filter:
//! ```bash
//! RUST_LOG=roster=debug roster
//! ```

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

static INIT: Once = Once::new();

/// Build the filter for a session: `RUST_LOG` if set, else the configured default.
pub fn build_filter(config: &Config) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Initialize the global subscriber. Only the first call has any effect.
pub fn init(config: &Config) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(build_filter(config))
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init();
    });
}

//! Logging utilities for fob-paths
//!
//! This module is only available with the `logging` feature.
//!
//! For library users: fob-paths emits tracing events - install your own subscriber.
//! For application developers: use these convenience functions.

use crate::options::LogLevel;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Build the filter for `level`, letting `RUST_LOG` directives refine it
fn filter_for(level: LogLevel) -> EnvFilter {
    let directive = level
        .as_filter()
        .parse()
        .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into());

    EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy()
}

/// Initialize fob-paths logging with specified level
///
/// # Thread Safety
///
/// Installs a global subscriber; only the first call in a process takes
/// effect, from whichever thread gets there first.
///
/// # Example
///
/// ```rust,no_run
/// use fob_paths::LogLevel;
/// use fob_paths::logging::init_logging;
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(filter_for(level))
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}

/// Initialize logging from the `RUST_LOG` environment variable
///
/// Falls back to Info level if `RUST_LOG` is not set or invalid.
///
/// ```rust,no_run
/// fob_paths::logging::init_logging_from_env();
/// ```
pub fn init_logging_from_env() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(LogLevel::Info));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_every_level() {
        for level in [
            LogLevel::Silent,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
        ] {
            let filter = filter_for(level).to_string();
            assert!(filter.contains(level.as_filter()), "{} -> {}", level, filter);
        }
    }
}

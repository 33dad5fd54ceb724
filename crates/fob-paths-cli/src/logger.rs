//! Logging infrastructure for the fob-paths CLI.
//!
//! Logs go to stderr so stdout carries only command output. `RUST_LOG`
//! is honoured when no level was chosen explicitly (the default `info`).

use fob_paths::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives for `level`, scoped to the fob-paths crates
pub fn filter_directives(level: LogLevel) -> String {
    format!("fob_paths={level},fob_paths_cli={level}")
}

/// Install the global subscriber
///
/// Call once, before any logging occurs.
pub fn init_logger(level: LogLevel, no_color: bool) {
    let filter = if level == LogLevel::default() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)))
    } else {
        EnvFilter::new(filter_directives(level))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(
            filter_directives(LogLevel::Debug),
            "fob_paths=debug,fob_paths_cli=debug"
        );
        assert_eq!(
            filter_directives(LogLevel::Silent),
            "fob_paths=off,fob_paths_cli=off"
        );
    }

    #[test]
    fn test_directives_parse() {
        for level in [LogLevel::Silent, LogLevel::Warn, LogLevel::Debug] {
            assert!(EnvFilter::try_new(filter_directives(level)).is_ok());
        }
    }
}

//! Structured Logger
//!
//! Human-readable console output on stderr plus daily-rotated NDJSON files,
//! filtered by `RUST_LOG` or the configured level.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "pricefeed.log";
pub const DEFAULT_LEVEL: &str = "info";

/// Filter for `level`, falling back to [`DEFAULT_LEVEL`] when it does not parse.
pub fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber.
///
/// An empty `log_dir` keeps output on the console only. Console lines go to
/// stderr so command output on stdout stays clean. Calling this twice is
/// harmless.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level));

    // `<log_dir>/pricefeed.log.YYYY-MM-DD`
    let log_dir = log_dir.as_ref();
    let file_layer = (!log_dir.as_os_str().is_empty()).then(|| {
        fmt::layer()
            .json()
            .with_writer(RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX))
            .with_ansi(false)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_level_is_kept() {
        assert_eq!(level_filter("debug").to_string(), "debug");
    }

    #[test]
    fn unparseable_level_falls_back_to_info() {
        assert_eq!(level_filter("pricefeed=loud").to_string(), DEFAULT_LEVEL);
    }
}

//! Structured Logger
//!
//! Wraps `tracing` with console output (plain or JSON), an optional daily
//! rolling NDJSON file, and `RUST_LOG`-style level control.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file prefix; files roll to `triton.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "triton.log";

/// Initialize the global logger.
///
/// `RUST_LOG` wins over `level` when set. Console output goes to stderr so
/// command output on stdout stays clean. Calling this twice is a no-op.
pub fn init_logger(log_dir: Option<&Path>, level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let (plain_console, json_console) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(fmt::layer().with_writer(std::io::stderr).with_target(false).with_ansi(true)),
            None,
        )
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(plain_console)
        .with(json_console)
        .with(file_layer)
        .try_init();
}

//! Logging setup for the application.

use crate::config::GlobalLogLevel;
use env_logger::{Builder, Env};
use log::LevelFilter;

impl From<GlobalLogLevel> for LevelFilter {
    fn from(level: GlobalLogLevel) -> Self {
        match level {
            GlobalLogLevel::Trace => Self::Trace,
            GlobalLogLevel::Debug => Self::Debug,
            GlobalLogLevel::Info => Self::Info,
            GlobalLogLevel::Warn => Self::Warn,
            GlobalLogLevel::Error => Self::Error,
        }
    }
}

/// Initializes the logger with the configured global level.
///
/// Directives in the `RUST_LOG` environment variable are applied after the
/// global level, so they take precedence for the modules they name (or for
/// everything, if they set a bare level).
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logger(level: GlobalLogLevel) {
    let mut builder = Builder::new();
    builder.filter_level(level.into());
    builder.parse_env(Env::default());

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized with global log level: {:?}", level);
    }
}

//! Logging setup for `font-compress`.

use log::LevelFilter;

/// Installs the global logger, writing to standard error.
///
/// Messages up to `level` are emitted unless overridden by the `RUST_LOG` environment variable.
pub fn init(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

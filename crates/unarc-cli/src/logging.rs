//! Logger setup.

use log::LevelFilter;

/// Installs a stderr logger at `level`.
///
/// The level comes from command-line flags only; `RUST_LOG` and other
/// environment variables are not consulted.
pub fn init(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();
}

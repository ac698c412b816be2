//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging; `verbose` lowers the default filter to debug.
/// `RUST_LOG` still takes precedence.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

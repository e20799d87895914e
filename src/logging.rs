//! Tracing subscriber setup for hosts embedding the storage manager.

use tracing_subscriber::EnvFilter;

/// Install a global subscriber filtered by `RUST_LOG`, falling back to
/// `default_level`. Returns `false` when a subscriber was already set.
pub fn init(default_level: &str, json: bool) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

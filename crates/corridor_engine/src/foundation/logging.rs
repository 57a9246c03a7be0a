//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honors `RUST_LOG`; falls back to `default_filter` when it is unset.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // Repeated initialization keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}

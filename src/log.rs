// src/log.rs
use tracing_subscriber::{EnvFilter, fmt};

/// Map `-v` count to a default filter; `RUST_LOG` wins when set.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "species_scrape=warn",
        1 => "species_scrape=info",
        2 => "species_scrape=debug",
        _ => "species_scrape=trace",
    }
}

/// Install the global subscriber. Lines carry time since start, like
/// `[00:00:01.234][INFO]`, and go to stderr so stdout stays clean for data.
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_timer(fmt::time::uptime())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

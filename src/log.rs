// src/log.rs
//
// Thin macro layer over `tracing`. Library code logs through these;
// the binary decides where the lines go via `init`.
// Output goes to stderr so stdout stays the human-facing report.

use tracing_subscriber::{EnvFilter, fmt::time::Uptime};

#[doc(hidden)]
pub use tracing;

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install the global subscriber. `RUST_LOG` wins over `verbose` when set.
pub fn init(verbose: bool) -> Result<(), InitError> {
    let fallback = if verbose { "n8n_watch=debug" } else { "n8n_watch=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Uptime::default())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::tracing::error!($($arg)*)
    };
}

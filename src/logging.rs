//! Tracing setup for the flowrel binary
//!
//! User-facing progress goes through [crate::ui]; tracing carries the
//! diagnostic events underneath it and writes them to stderr.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default level when `RUST_LOG` is unset
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the level chosen from `verbose`. Only the first
/// call in a process takes effect.
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose).as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}

#![forbid(unsafe_code)]

//! JSON log output for production hosts.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! embedding application's decision. This helper wires the common setup:
//! JSON lines on stderr, filtered by `RUST_LOG` (default `overlay=info`).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Default filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "overlay=info,overlay_widgets=info,overlay_runtime=info";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_json_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        init_json_logging();
        assert!(!init_json_logging());
        tracing::debug!(target: "overlay::diagnostics", "json logging installed");
    }
}

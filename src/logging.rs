//! logging
//!
//! Tracing subscriber setup for the binary.
//!
//! `RUST_LOG` takes precedence. Without it the filter is `warn`, or
//! `trellocli=debug` when `--debug` is passed. Output goes to stderr so
//! `--json` output on stdout stays parseable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "warn,trellocli=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a subscriber is already installed.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(debug)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

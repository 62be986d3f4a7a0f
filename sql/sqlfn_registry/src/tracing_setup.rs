//! Tracing setup for binaries and tests embedding the resolver.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Respects `RUST_LOG` (e.g. `RUST_LOG=sqlfn_registry=debug`). Does nothing
/// when `RUST_LOG` is unset; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host process.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

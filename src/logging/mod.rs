//! Structured logging via `tracing`.
//!
//! Initialization is `Once`-guarded and safe to call from the plugin, tests
//! and benches alike; the first caller wins and `RUST_LOG` overrides the
//! built-in filter.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Default per-module filter for the core
pub const DEFAULT_FILTER: &str =
    "info,ascent_core::generation=debug,ascent_core::registry=debug,ascent_core::engine=info";

/// Initialize tracing with the default filter (idempotent)
pub fn init_tracing_default() {
    init_tracing(DEFAULT_FILTER);
}

/// Initialize tracing with a custom filter string (idempotent, first call
/// wins; `RUST_LOG` takes precedence when set)
pub fn init_tracing(filter: &str) {
    let filter = filter.to_owned();
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact();

        // A global subscriber may already be installed (e.g. by Bevy)
        let _ = subscriber.try_init();
    });
}

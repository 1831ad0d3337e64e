//! Diagnostic logging
//!
//! Diagnostics go through `tracing` and are written to stderr so that command
//! output on stdout stays untouched. The filter comes from `TWIG_LOG`
//! (`EnvFilter` syntax, e.g. `TWIG_LOG=twig=debug`) and defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "TWIG_LOG";
const DEFAULT_FILTER: &str = "warn";

pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // a second initialization (e.g. from tests) is not an error worth reporting
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .try_init();
}

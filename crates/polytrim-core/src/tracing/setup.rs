//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Name of the environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "POLYTRIM_LOG";

/// Initialize the polytrim tracing/logging system.
///
/// Reads `POLYTRIM_LOG` for per-module log levels, e.g.
/// `POLYTRIM_LOG=polytrim_analysis::engine=debug,polytrim_analysis::parsers=warn`.
/// Falls back to `polytrim=info` if the variable is unset or invalid.
///
/// Output goes to stderr so that stdout stays usable for module lists and
/// import preludes. Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("polytrim=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}

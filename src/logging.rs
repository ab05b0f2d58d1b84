//! Diagnostic logging via `tracing` + `tracing-subscriber`.
//!
//! User-facing progress and the summary go through [`crate::infra::output::Output`];
//! this is only for diagnostics on stderr. The filter is read from the
//! `PRESET_MATRIX_LOG` environment variable (e.g. "debug",
//! "preset_matrix=trace") and defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the diagnostic filter.
pub const LOG_ENV: &str = "PRESET_MATRIX_LOG";

/// Initialise the global subscriber. Calling it more than once is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

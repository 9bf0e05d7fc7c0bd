//! Logging setup using `tracing-subscriber`.
//!
//! Human-readable output on stderr only, so log lines never interleave
//! with the shell's stdout. Controlled by `RUST_LOG` (default: `warn`,
//! the interactive loop should stay quiet unless something goes wrong).

use tracing_subscriber::EnvFilter;

/// Initialise the stderr logger. Call once, before any other output.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

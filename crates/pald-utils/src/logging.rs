//! Structured logging init, shared by the `pald` binary and integration tests.
//! Uses `tracing` + `tracing-subscriber` with an env-filter, matching the
//! teacher's observability stack rather than hand-rolled `println!` logging.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialise a global `tracing` subscriber reading `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

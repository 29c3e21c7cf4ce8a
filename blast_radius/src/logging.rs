//! Diagnostic tracing for the CLI.
//!
//! - **Tracing (this module)**: diagnostics via `RUST_LOG`, output to stderr.
//! - **Status lines**: operator-facing messages are printed to stdout by
//!   [`crate::visualize`] and are unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset, so skipped files
/// during a scan are still reported.
///
/// # Example
/// ```bash
/// RUST_LOG=blast_radius=debug blast-radius core
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

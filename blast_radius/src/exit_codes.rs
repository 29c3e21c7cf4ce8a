//! Stable exit codes for the `blast-radius` CLI.

/// Visualization generated (or `--list` printed candidates).
pub const OK: i32 = 0;
/// The flow ran but reported failure (no entry points, tool missing, render failed).
pub const FAILED: i32 = 1;
/// Invalid configuration or an unexpected error before or during the flow.
pub const INVALID: i32 = 2;

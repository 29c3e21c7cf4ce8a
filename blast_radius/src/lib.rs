//! Entry-point discovery and dependency visualization wrapper.
//!
//! Scans a source tree for files that look like good roots for dependency
//! traversal, lets an operator pick one, and hands it to the external
//! `dep-tree` tool to render an interactive HTML graph.
//!
//! - **[`core`]**: Pure, deterministic logic (filtering, ranking, menu parsing).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem scan, subprocesses,
//!   terminal prompts, browser). Each external effect sits behind a trait so
//!   tests can script it.
//!
//! [`visualize`] coordinates core logic with I/O to implement the CLI flow.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod visualize;

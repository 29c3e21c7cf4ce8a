//! Side-effecting adapters: filesystem, subprocesses, terminal, browser.

pub mod browser;
pub mod config;
pub mod process;
pub mod prompt;
pub mod scan;
pub mod tool;

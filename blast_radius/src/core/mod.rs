//! Deterministic, pure logic shared by the scan and selection flow.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod choice;
pub mod filter;
pub mod rank;
pub mod types;

//! Shared types passed between the scan, selection, and render steps.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A source file that looks like a plausible root for dependency traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub path: PathBuf,
    /// File size in bytes, captured once during the scan.
    pub size: u64,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Operator answer to the directory menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryChoice {
    /// One of the configured menu entries.
    Preset(String),
    /// Anything else, taken verbatim as a path.
    Custom(PathBuf),
}

impl DirectoryChoice {
    pub fn into_path(self) -> PathBuf {
        match self {
            DirectoryChoice::Preset(name) => PathBuf::from(name),
            DirectoryChoice::Custom(path) => path,
        }
    }
}

/// Operator answer to the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryChoice {
    /// Zero-based index into the presented candidates.
    Listed(usize),
    /// Raw input used as a file path.
    Literal(PathBuf),
}

/// Result of a single `dep-tree entropy` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Tool exited successfully.
    Rendered,
    /// Tool exited non-zero (`None` when killed by a signal).
    Failed { code: Option<i32> },
}

/// Availability of the external tool after the check/install step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// `--version` succeeded; carries the trimmed version output.
    Present(String),
    /// `--version` failed but the install command succeeded.
    Installed,
    /// Neither the tool nor an install was available; carries the reason.
    Unavailable(String),
}

impl ToolStatus {
    pub fn is_usable(&self) -> bool {
        !matches!(self, ToolStatus::Unavailable(_))
    }
}

//! Filesystem scan for entry-point candidates.

use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::core::filter::{KeywordMatcher, has_extension, is_excluded};
use crate::core::rank::rank_candidates;
use crate::core::types::Candidate;
use crate::io::config::ScanConfig;

/// Scan `root` and return the ranked, truncated candidate list.
///
/// Unreadable files and directories are logged and skipped; only a missing
/// or non-directory `root` is an error.
///
/// Exclusion markers are matched against the path as walked, `root` included.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn find_entry_points(root: &Path, scan: &ScanConfig) -> Result<Vec<Candidate>> {
    let candidates = collect_candidates(root, scan)?;
    debug!(found = candidates.len(), "qualifying files collected");
    Ok(rank_candidates(candidates, scan.rank, scan.limit))
}

/// Every qualifying file under `root`, in walk order.
pub fn collect_candidates(root: &Path, scan: &ScanConfig) -> Result<Vec<Candidate>> {
    if !root.is_dir() {
        return Err(anyhow!("{} is not a directory", root.display()));
    }
    let matcher = KeywordMatcher::new(&scan.keywords)?;
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(err = %err, "skipping unreadable path");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if !has_extension(path, &scan.extensions) {
            continue;
        }
        if is_excluded(path, &scan.exclude_markers) {
            debug!(path = %path.display(), "excluded by marker");
            continue;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(path = %path.display(), err = %err, "error reading file, skipping");
                continue;
            }
        };
        if matcher.matches(&String::from_utf8_lossy(&bytes)) {
            candidates.push(Candidate::new(path, bytes.len() as u64));
        }
    }

    Ok(candidates)
}

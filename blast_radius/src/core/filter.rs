//! Path and content heuristics that decide whether a file is a candidate.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use regex::Regex;

/// True if the `/`-normalised path contains any of the exclusion markers.
///
/// Markers are plain substrings such as `spec/` or `test/`, so they match at
/// any depth.
pub fn is_excluded(path: &Path, markers: &[String]) -> bool {
    let normalized = path.to_string_lossy().replace('\\', "/");
    markers
        .iter()
        .any(|marker| normalized.contains(marker.as_str()))
}

/// True if the file extension equals one of `extensions` (given without the dot).
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    extensions.iter().any(|wanted| wanted == ext)
}

/// Substring matcher for definition keywords (`class `, `module `, ...).
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Regex,
}

impl KeywordMatcher {
    pub fn new(keywords: &[String]) -> Result<Self> {
        if keywords.iter().all(|keyword| keyword.is_empty()) {
            return Err(anyhow!("keyword list must contain a non-empty keyword"));
        }
        let pattern = keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| regex::escape(keyword))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&pattern).context("compile keyword pattern")?;
        Ok(Self { regex })
    }

    pub fn matches(&self, contents: &str) -> bool {
        self.regex.is_match(contents)
    }
}

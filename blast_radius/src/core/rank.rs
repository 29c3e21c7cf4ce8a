//! Ordering heuristics applied to candidates before truncation.
//!
//! "Smaller files are better entry points" is only a proxy, so the ordering
//! is a strategy picked from config or the CLI rather than a fixed rule.

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::types::Candidate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RankStrategy {
    /// Ascending by size: focused files first.
    #[default]
    SmallestFirst,
    /// Descending by size: files that pull in the most first.
    LargestFirst,
    /// Lexicographic by path.
    Path,
}

impl RankStrategy {
    /// Total order for this strategy. Ties fall back to path order.
    pub fn compare(self, a: &Candidate, b: &Candidate) -> Ordering {
        let primary = match self {
            RankStrategy::SmallestFirst => a.size.cmp(&b.size),
            RankStrategy::LargestFirst => b.size.cmp(&a.size),
            RankStrategy::Path => Ordering::Equal,
        };
        primary.then_with(|| a.path.cmp(&b.path))
    }
}

/// Sort `candidates` by `strategy` and keep the first `limit`.
pub fn rank_candidates(
    mut candidates: Vec<Candidate>,
    strategy: RankStrategy,
    limit: usize,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| strategy.compare(a, b));
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Candidate> {
        vec![
            Candidate::new("c.rb", 30),
            Candidate::new("a.rb", 10),
            Candidate::new("d.rb", 10),
            Candidate::new("b.rb", 20),
        ]
    }

    fn paths(candidates: &[Candidate]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| c.path.display().to_string())
            .collect()
    }

    #[test]
    fn smallest_first_breaks_ties_by_path() {
        let ranked = rank_candidates(sample(), RankStrategy::SmallestFirst, 10);
        assert_eq!(paths(&ranked), vec!["a.rb", "d.rb", "b.rb", "c.rb"]);
    }

    #[test]
    fn largest_first_reverses_size_only() {
        let ranked = rank_candidates(sample(), RankStrategy::LargestFirst, 10);
        assert_eq!(paths(&ranked), vec!["c.rb", "b.rb", "a.rb", "d.rb"]);
    }

    #[test]
    fn path_strategy_ignores_size() {
        let ranked = rank_candidates(sample(), RankStrategy::Path, 10);
        assert_eq!(paths(&ranked), vec!["a.rb", "b.rb", "c.rb", "d.rb"]);
    }

    #[test]
    fn truncates_to_limit() {
        let ranked = rank_candidates(sample(), RankStrategy::SmallestFirst, 2);
        assert_eq!(paths(&ranked), vec!["a.rb", "d.rb"]);
    }

    #[test]
    fn strategy_names_are_kebab_case_in_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            rank: RankStrategy,
        }
        let parsed: Wrapper = toml::from_str("rank = \"largest-first\"").expect("parse");
        assert_eq!(parsed.rank, RankStrategy::LargestFirst);
    }
}

//! Submission records as produced by the loader.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::split::Split;

/// Pass^k / Pass@k scores for one split of one submission.
///
/// Every value is `None` when the split had fewer trials than `k`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitMetrics {
    /// Pass^1: a single sampled trial succeeds.
    pub pass_power_1: Option<f64>,
    /// Pass^3: all of three sampled trials succeed.
    pub pass_power_3: Option<f64>,
    /// Pass@3: at least one of three sampled trials succeeds.
    pub pass_at_3: Option<f64>,
}

impl SplitMetrics {
    /// `true` unless Pass^3 exceeds Pass@3 while both are present.
    ///
    /// "All succeed" implies "at least one succeeds", so a violation means the
    /// upstream harness produced inconsistent scores.
    pub fn is_consistent(&self) -> bool {
        match (self.pass_power_3, self.pass_at_3) {
            (Some(power), Some(at)) => power <= at,
            _ => true,
        }
    }
}

/// Reward earned on a single task trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReward {
    pub split: Split,
    pub task_id: String,
    pub reward: Option<f64>,
}

/// One evaluation run of an agent against the benchmark.
///
/// Immutable once loaded; nothing in this crate mutates a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Owning agent. `None` or empty for partially-populated entries.
    pub agent_id: Option<String>,
    /// Pass^3 aggregated over all splits.
    pub overall_pass_power_3: Option<f64>,
    /// Wall-clock seconds spent on the run.
    pub time_used: Option<f64>,
    /// Overall pass rate in percent (0–100).
    pub pass_rate: Option<f64>,
    /// Number of tasks the run was scored against.
    pub max_score: Option<u64>,
    /// Per-split metric bundles. Missing splits have no entry.
    pub splits: BTreeMap<Split, SplitMetrics>,
    /// Per-task rewards, in document order.
    pub task_rewards: Vec<TaskReward>,
}

impl SubmissionResult {
    /// Metrics for `split`, all-`None` when the split is absent.
    pub fn split(&self, split: Split) -> SplitMetrics {
        self.splits.get(&split).copied().unwrap_or_default()
    }
}

/// Everything loaded for one leaderboard run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Submissions in input order (file name order, then array order).
    pub submissions: Vec<SubmissionResult>,
    /// Files the submissions were read from, sorted.
    pub sources: Vec<PathBuf>,
    /// SHA-256 of the canonical JSON of `submissions`.
    pub input_digest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_split_yields_empty_metrics() {
        let sub = SubmissionResult::default();
        assert_eq!(sub.split(Split::Base), SplitMetrics::default());
    }

    #[test]
    fn consistency_flags_power_above_at() {
        let ok = SplitMetrics {
            pass_power_1: Some(0.7),
            pass_power_3: Some(0.4),
            pass_at_3: Some(0.9),
        };
        assert!(ok.is_consistent());

        let bad = SplitMetrics {
            pass_power_3: Some(0.95),
            pass_at_3: Some(0.9),
            ..SplitMetrics::default()
        };
        assert!(!bad.is_consistent());

        let partial = SplitMetrics {
            pass_power_3: Some(0.95),
            ..SplitMetrics::default()
        };
        assert!(partial.is_consistent());
    }
}

//! Per-task success rates across every submission.

use std::collections::BTreeMap;

use crate::aggregate::MeanAccumulator;
use crate::domain::SubmissionResult;
use crate::format::format_fixed;
use crate::reporting::LeaderboardTable;

/// Rows shown when no limit is configured.
pub const DEFAULT_TASK_LIMIT: usize = 20;

/// Mean reward (two decimals) and attempt count per `(split, task_id)`,
/// ordered by split name then task id and truncated to `limit` rows.
///
/// Attempts count every trial, including those without a reward.
pub fn task_success_rates(submissions: &[SubmissionResult], limit: usize) -> LeaderboardTable {
    let mut tasks: BTreeMap<(&'static str, &str), (MeanAccumulator, usize)> = BTreeMap::new();
    for reward in submissions.iter().flat_map(|s| &s.task_rewards) {
        let entry = tasks
            .entry((reward.split.as_str(), reward.task_id.as_str()))
            .or_default();
        entry.0.push(reward.reward);
        entry.1 += 1;
    }

    let rows = tasks
        .into_iter()
        .take(limit)
        .map(|((split, task_id), (rate, attempts))| {
            vec![
                split.to_string(),
                task_id.to_string(),
                format_fixed(rate.mean(), 2),
                attempts.to_string(),
            ]
        })
        .collect();

    LeaderboardTable::new(
        "Task Success Rates",
        ["Split", "Task ID", "Success Rate", "Attempts"]
            .map(str::to_string)
            .to_vec(),
        rows,
    )
}

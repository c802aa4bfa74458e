//! Metric extraction.
//!
//! Projects a [`SubmissionResult`] onto the flat set of fields both leaderboard
//! policies consume. This is a projection, not a validator: out-of-range
//! values pass through untouched. The only rule is that a submission must
//! name its agent.

use serde::{Deserialize, Serialize};

use crate::domain::{Split, SplitMetrics, SubmissionResult};
use crate::obs;

/// Flat metric record for one submission with a known agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMetrics {
    pub agent_id: String,
    pub overall_pass_power_3: Option<f64>,
    pub time_used: Option<f64>,
    /// Indexed by `Split` declaration order.
    pub splits: [SplitMetrics; 3],
}

impl ExtractedMetrics {
    /// Metrics for one split.
    pub fn split(&self, split: Split) -> &SplitMetrics {
        &self.splits[split as usize]
    }

    /// Splits whose Pass^3 exceeds Pass@3, in `Split` declaration order.
    pub fn inconsistent_splits(&self) -> impl Iterator<Item = Split> + '_ {
        Split::ALL
            .into_iter()
            .filter(|split| !self.split(*split).is_consistent())
    }
}

/// Agent id of `submission`, or `None` when it is missing or blank.
pub fn agent_id_of(submission: &SubmissionResult) -> Option<&str> {
    submission
        .agent_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
}

/// Extract the downstream fields of one submission.
///
/// Returns `None` for submissions without an agent.
pub fn extract(submission: &SubmissionResult) -> Option<ExtractedMetrics> {
    let agent_id = agent_id_of(submission)?;
    Some(ExtractedMetrics {
        agent_id: agent_id.to_string(),
        overall_pass_power_3: submission.overall_pass_power_3,
        time_used: submission.time_used,
        splits: Split::ALL.map(|split| submission.split(split)),
    })
}

/// Extract every submission in input order, silently dropping those without
/// an agent.
///
/// A split with Pass^3 above Pass@3 is logged and kept unchanged.
pub fn extract_all(submissions: &[SubmissionResult]) -> Vec<ExtractedMetrics> {
    submissions
        .iter()
        .enumerate()
        .filter_map(|(index, submission)| {
            let Some(extracted) = extract(submission) else {
                obs::emit_record_dropped(&index, "missing agent id");
                return None;
            };
            for split in extracted.inconsistent_splits() {
                let metrics = extracted.split(split);
                if let (Some(power), Some(at)) = (metrics.pass_power_3, metrics.pass_at_3) {
                    obs::emit_inconsistent_split(&extracted.agent_id, split.as_str(), power, at);
                }
            }
            Some(extracted)
        })
        .collect()
}

//! Best-submission ranking.
//!
//! Partitions submissions by agent, orders each partition by overall Pass^3
//! descending and numbers them 1..=n per agent. Every rankable submission is
//! kept; selecting `submission_number == 1` gives each agent's best.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::extract::ExtractedMetrics;
use crate::obs;

/// One submission with its per-agent rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSubmission {
    /// 1 for the agent's top submission, 2 for the next, and so on.
    pub submission_number: usize,
    pub metrics: ExtractedMetrics,
}

impl RankedSubmission {
    /// Overall Pass^3. Always present for ranked submissions.
    pub fn key(&self) -> f64 {
        self.metrics.overall_pass_power_3.unwrap_or(f64::NAN)
    }

    pub fn is_best(&self) -> bool {
        self.submission_number == 1
    }
}

/// Group submissions by agent, preserving first-appearance order of agents and
/// input order within each agent.
pub fn group_by_agent(extracted: &[ExtractedMetrics]) -> Vec<(&str, Vec<&ExtractedMetrics>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&ExtractedMetrics>)> = Vec::new();

    for metrics in extracted {
        let agent = metrics.agent_id.as_str();
        match index.get(agent) {
            Some(&slot) => groups[slot].1.push(metrics),
            None => {
                index.insert(agent, groups.len());
                groups.push((agent, vec![metrics]));
            }
        }
    }
    groups
}

/// Number every submission within its agent partition.
///
/// Submissions without an overall Pass^3 cannot be ranked and are left out.
/// Ties keep input order. Output is grouped by agent (first-appearance order)
/// and ranked within each group; global ordering is the formatter's job.
pub fn rank_submissions(extracted: &[ExtractedMetrics]) -> Vec<RankedSubmission> {
    let mut ranked = Vec::with_capacity(extracted.len());

    for (agent, submissions) in group_by_agent(extracted) {
        let mut rankable: Vec<(f64, &ExtractedMetrics)> = Vec::with_capacity(submissions.len());
        for metrics in submissions {
            match metrics.overall_pass_power_3 {
                Some(key) => rankable.push((key, metrics)),
                None => obs::emit_record_dropped(&agent, "missing overall Pass^3"),
            }
        }

        // `sort_by` is stable, so equal keys keep input order.
        rankable.sort_by(|a, b| b.0.total_cmp(&a.0));

        ranked.extend(
            rankable
                .into_iter()
                .enumerate()
                .map(|(i, (_, metrics))| RankedSubmission {
                    submission_number: i + 1,
                    metrics: metrics.clone(),
                }),
        );
    }
    ranked
}

/// Keep only each agent's top submission.
pub fn best_only(ranked: Vec<RankedSubmission>) -> Vec<RankedSubmission> {
    ranked.into_iter().filter(RankedSubmission::is_best).collect()
}

//! Mean-across-submissions aggregation.
//!
//! Produces exactly one row per agent. Every numeric field is averaged
//! independently over the submissions where it is present; a field absent
//! from all of an agent's submissions stays `None`.

use serde::{Deserialize, Serialize};

use crate::domain::{Split, SplitMetrics};
use crate::extract::ExtractedMetrics;
use crate::rank::group_by_agent;

/// Running mean that ignores missing values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    /// Number of values pushed that were present.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, or `None` if nothing was present.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean of the present values in `values`.
pub fn mean_of<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut acc = MeanAccumulator::default();
    values.into_iter().for_each(|v| acc.push(v));
    acc.mean()
}

/// One agent's averaged metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAggregate {
    /// Number of submissions that contributed (with or without values).
    pub submission_count: usize,
    pub metrics: ExtractedMetrics,
}

impl AgentAggregate {
    /// Mean overall Pass^3. Always present for emitted aggregates.
    pub fn key(&self) -> f64 {
        self.metrics.overall_pass_power_3.unwrap_or(f64::NAN)
    }
}

fn mean_split(submissions: &[&ExtractedMetrics], split: Split) -> SplitMetrics {
    SplitMetrics {
        pass_power_1: mean_of(submissions.iter().map(|s| s.split(split).pass_power_1)),
        pass_power_3: mean_of(submissions.iter().map(|s| s.split(split).pass_power_3)),
        pass_at_3: mean_of(submissions.iter().map(|s| s.split(split).pass_at_3)),
    }
}

/// Average every metric per agent, in first-appearance order of agents.
///
/// Agents whose overall Pass^3 is missing in every submission have no
/// primary key and are left out.
pub fn aggregate_by_agent(extracted: &[ExtractedMetrics]) -> Vec<AgentAggregate> {
    group_by_agent(extracted)
        .into_iter()
        .filter_map(|(agent, submissions)| {
            let overall = mean_of(submissions.iter().map(|s| s.overall_pass_power_3));
            if overall.is_none() {
                tracing::debug!(agent = %agent, "no overall Pass^3 in any submission");
                return None;
            }
            Some(AgentAggregate {
                submission_count: submissions.len(),
                metrics: ExtractedMetrics {
                    agent_id: agent.to_string(),
                    overall_pass_power_3: overall,
                    time_used: mean_of(submissions.iter().map(|s| s.time_used)),
                    splits: Split::ALL.map(|split| mean_split(&submissions, split)),
                },
            })
        })
        .collect()
}

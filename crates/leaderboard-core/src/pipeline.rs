//! End-to-end leaderboard views.
//!
//! Each view is a pure function of the loaded submissions. The best and mean
//! views share only the extraction step, so their policies stay independent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_by_agent;
use crate::config::LeaderboardConfig;
use crate::domain::SubmissionResult;
use crate::extract::extract_all;
use crate::format::{format_best_view, format_mean_view, ScoreFormat};
use crate::obs;
use crate::rank::{best_only, rank_submissions};
use crate::reporting::LeaderboardTable;
use crate::views::{overall_performance, performance_by_split, task_success_rates};

/// Every view this crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Best,
    Mean,
    Overall,
    BySplit,
    Tasks,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Best,
        ViewKind::Mean,
        ViewKind::Overall,
        ViewKind::BySplit,
        ViewKind::Tasks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Best => "best",
            ViewKind::Mean => "mean",
            ViewKind::Overall => "overall",
            ViewKind::BySplit => "by-split",
            ViewKind::Tasks => "tasks",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown view '{s}'"))
    }
}

/// Best-submission leaderboard: every submission numbered per agent, rows
/// ordered by overall Pass^3. With `top_only`, only each agent's #1 remains.
pub fn best_submission_view(
    submissions: &[SubmissionResult],
    format: ScoreFormat,
    top_only: bool,
) -> LeaderboardTable {
    let mut ranked = rank_submissions(&extract_all(submissions));
    if top_only {
        ranked = best_only(ranked);
    }
    format_best_view(&ranked, format)
}

/// Mean leaderboard: one row per agent with every metric averaged.
pub fn mean_view(submissions: &[SubmissionResult], format: ScoreFormat) -> LeaderboardTable {
    format_mean_view(&aggregate_by_agent(&extract_all(submissions)), format)
}

/// Build one view according to `config`.
pub fn build_view(
    kind: ViewKind,
    submissions: &[SubmissionResult],
    config: &LeaderboardConfig,
) -> LeaderboardTable {
    let table = match kind {
        ViewKind::Best => best_submission_view(submissions, config.best_format, config.best_only),
        ViewKind::Mean => mean_view(submissions, config.mean_format),
        ViewKind::Overall => overall_performance(submissions),
        ViewKind::BySplit => performance_by_split(submissions),
        ViewKind::Tasks => task_success_rates(submissions, config.task_limit),
    };
    obs::emit_view_built(kind.as_str(), table.rows.len());
    table
}

/// Build every view, in [`ViewKind::ALL`] order.
pub fn build_all(
    submissions: &[SubmissionResult],
    config: &LeaderboardConfig,
) -> Vec<LeaderboardTable> {
    ViewKind::ALL
        .into_iter()
        .map(|kind| build_view(kind, submissions, config))
        .collect()
}

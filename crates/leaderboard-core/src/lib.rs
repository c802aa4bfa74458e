//! CAR-bench Leaderboard Core Library
//!
//! Loads scored benchmark submissions and reduces them into ranked
//! leaderboard tables:
//!
//! - `loader`: result directory → [`ResultSet`]
//! - `extract`: submission → flat metric record (drops agent-less records)
//! - `rank`: best-submission policy, numbered per agent
//! - `aggregate`: mean-across-submissions policy, one row per agent
//! - `format`: display strings and the final row order
//! - `views`: overall, per-split and per-task supplementary views

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod extract;
pub mod format;
pub mod loader;
pub mod obs;
pub mod pipeline;
pub mod rank;
pub mod reporting;
pub mod telemetry;
pub mod views;

pub use domain::{
    LeaderboardError, Result, ResultSet, Split, SplitMetrics, SubmissionResult, TaskReward,
};

pub use aggregate::{aggregate_by_agent, AgentAggregate, MeanAccumulator};
pub use config::LeaderboardConfig;
pub use extract::{extract, extract_all, ExtractedMetrics};
pub use format::{format_best_view, format_mean_view, ScoreFormat};
pub use loader::{load_results_dir, load_results_file, parse_results_document};
pub use obs::PipelineSpan;
pub use pipeline::{best_submission_view, build_all, build_view, mean_view, ViewKind};
pub use rank::{best_only, rank_submissions, RankedSubmission};
pub use reporting::{
    render_markdown, write_leaderboard_json, LeaderboardArtifact, LeaderboardTable,
};
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Domain models for the leaderboard engine.
//!
//! Canonical definitions for the core entities:
//! - `Split`: Closed set of task categories
//! - `SplitMetrics`: Per-split Pass^k / Pass@k scores
//! - `SubmissionResult`: One evaluation run of an agent
//! - `ResultSet`: Immutable snapshot of everything loaded for one run

pub mod digest;
pub mod error;
pub mod split;
pub mod submission;

// Re-export main types and errors
pub use error::{LeaderboardError, Result};
pub use split::Split;
pub use submission::{ResultSet, SplitMetrics, SubmissionResult, TaskReward};

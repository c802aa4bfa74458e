//! Supplementary leaderboard views.
//!
//! Each view is an independent pure function over the loaded submissions:
//! - [`overall`]: best pass rate per agent with task totals
//! - [`by_split`]: mean Pass^1 per agent and split, as a percentage
//! - [`task_success`]: mean reward and attempt count per task

pub mod by_split;
pub mod overall;
pub mod task_success;

pub use by_split::performance_by_split;
pub use overall::overall_performance;
pub use task_success::{task_success_rates, DEFAULT_TASK_LIMIT};

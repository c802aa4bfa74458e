//! Structured observability hooks for leaderboard runs.
//!
//! This module provides:
//! - A run-scoped tracing span via the `PipelineSpan` RAII guard
//! - Emission functions for the load, drop and view-built steps

use tracing::{debug, info, warn};

/// RAII guard that enters a span tagged with the snapshot digest for the
/// duration of a leaderboard run.
pub struct PipelineSpan {
    _span: tracing::span::EnteredSpan,
}

impl PipelineSpan {
    /// Create and enter a span tagged with `input_digest`.
    pub fn enter(input_digest: &str) -> Self {
        let span = tracing::info_span!("leaderboard.run", input_digest = %input_digest);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: result directory loaded.
pub fn emit_results_loaded(dir: &str, files: usize, submissions: usize) {
    info!(
        event = "results.loaded",
        dir = %dir,
        files = files,
        submissions = submissions,
    );
}

/// Emit event: a submission was dropped before ranking or aggregation.
///
/// Drops are expected upstream sparsity, so this logs at `debug!`.
pub fn emit_record_dropped(record: &dyn std::fmt::Display, reason: &str) {
    debug!(event = "record.dropped", record = %record, reason = %reason);
}

/// Emit event: a split reports Pass^3 above Pass@3.
///
/// The values are still used as given; this only flags suspect input.
pub fn emit_inconsistent_split(agent: &str, split: &str, pass_power_3: f64, pass_at_3: f64) {
    warn!(
        event = "split.inconsistent",
        agent = %agent,
        split = %split,
        pass_power_3 = pass_power_3,
        pass_at_3 = pass_at_3,
    );
}

/// Emit event: a view finished with `rows` output rows.
pub fn emit_view_built(view: &str, rows: usize) {
    info!(event = "view.built", view = %view, rows = rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_span_create() {
        let _span = PipelineSpan::enter("abc123");
        emit_inconsistent_split("agent-1", "base", 0.95, 0.9);
        emit_view_built("best", 0);
    }
}

//! Leaderboard formatting.
//!
//! Turns ranked or aggregated metrics into display strings and the final
//! ordered row set. Two score formats exist because the two views are read
//! differently: the best-submission board shows ratios (`.86`), the mean
//! board shows integer percentages (`86`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::AgentAggregate;
use crate::domain::Split;
use crate::extract::ExtractedMetrics;
use crate::rank::RankedSubmission;
use crate::reporting::LeaderboardTable;

/// Placeholder for a missing value.
pub const MISSING: &str = "-";

pub const COL_AGENT: &str = "Agent ID";
pub const COL_SUBMISSION: &str = "Submission #";
pub const COL_OVERALL: &str = "Overall Pass^3";
pub const COL_TIME: &str = "Time";

/// How Pass^k / Pass@k values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFormat {
    /// Two decimals with the leading zero stripped: `0.857` → `.86`.
    Ratio,
    /// Scaled to 0–100 and rounded to an integer: `0.857` → `86`.
    Percent,
}

impl ScoreFormat {
    pub fn apply(self, value: Option<f64>) -> String {
        match self {
            ScoreFormat::Ratio => format_ratio(value),
            ScoreFormat::Percent => format_percent(value),
        }
    }
}

impl fmt::Display for ScoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScoreFormat::Ratio => "ratio",
            ScoreFormat::Percent => "percent",
        })
    }
}

impl FromStr for ScoreFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ratio" => Ok(ScoreFormat::Ratio),
            "percent" => Ok(ScoreFormat::Percent),
            other => Err(format!("unknown score format '{other}' (expected ratio|percent)")),
        }
    }
}

/// Round to `decimals` places, ties away from zero (`0.125` → `0.13`).
///
/// `format!("{:.N}")` alone resolves exact ties to even, so every formatter
/// rounds through here first. A result of zero is returned as `+0.0`.
pub fn round_half_away(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Two-decimal ratio without the leading zero.
pub fn format_ratio(value: Option<f64>) -> String {
    let Some(v) = value else {
        return MISSING.to_string();
    };
    let fixed = format!("{:.2}", round_half_away(v, 2));
    if let Some(rest) = fixed.strip_prefix("0.") {
        format!(".{rest}")
    } else if let Some(rest) = fixed.strip_prefix("-0.") {
        format!("-.{rest}")
    } else {
        fixed
    }
}

/// Integer percentage.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", round_half_away(v * 100.0, 0) as i64),
        None => MISSING.to_string(),
    }
}

/// Fixed-decimal number with no stripping.
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.decimals$}", round_half_away(v, decimals)),
        None => MISSING.to_string(),
    }
}

/// Elapsed seconds, one decimal, no unit.
pub fn format_time(value: Option<f64>) -> String {
    format_fixed(value, 1)
}

fn split_columns() -> impl Iterator<Item = String> {
    Split::ALL.into_iter().flat_map(|split| {
        let label = split.label();
        [
            format!("{label} Pass^1"),
            format!("{label} Pass^3"),
            format!("{label} Pass@3"),
        ]
    })
}

/// Column labels of the best-submission view, in order.
pub fn best_columns() -> Vec<String> {
    [COL_AGENT, COL_SUBMISSION, COL_OVERALL]
        .into_iter()
        .map(str::to_string)
        .chain(split_columns())
        .chain(std::iter::once(COL_TIME.to_string()))
        .collect()
}

/// Column labels of the mean view, in order.
pub fn mean_columns() -> Vec<String> {
    [COL_AGENT, COL_OVERALL]
        .into_iter()
        .map(str::to_string)
        .chain(split_columns())
        .chain(std::iter::once(COL_TIME.to_string()))
        .collect()
}

fn metric_cells(metrics: &ExtractedMetrics, format: ScoreFormat) -> Vec<String> {
    let mut cells = vec![format.apply(metrics.overall_pass_power_3)];
    for split in Split::ALL {
        let m = metrics.split(split);
        cells.push(format.apply(m.pass_power_1));
        cells.push(format.apply(m.pass_power_3));
        cells.push(format.apply(m.pass_at_3));
    }
    cells.push(format_time(metrics.time_used));
    cells
}

/// Sort keyed rows by key descending, keeping incoming order on ties.
fn order_by_key(mut keyed: Vec<(f64, Vec<String>)>) -> Vec<Vec<String>> {
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Format the best-submission view.
///
/// Rows are ordered by overall Pass^3 alone; submission numbers never
/// reorder rows. Rows without a primary key are excluded.
pub fn format_best_view(ranked: &[RankedSubmission], format: ScoreFormat) -> LeaderboardTable {
    let keyed = ranked
        .iter()
        .filter_map(|r| {
            let key = r.metrics.overall_pass_power_3?;
            let mut row = vec![r.metrics.agent_id.clone(), r.submission_number.to_string()];
            row.extend(metric_cells(&r.metrics, format));
            Some((key, row))
        })
        .collect();
    LeaderboardTable::new("Best Submission", best_columns(), order_by_key(keyed))
}

/// Format the mean view: one row per agent, ordered by mean overall Pass^3.
pub fn format_mean_view(aggregates: &[AgentAggregate], format: ScoreFormat) -> LeaderboardTable {
    let keyed = aggregates
        .iter()
        .filter_map(|a| {
            let key = a.metrics.overall_pass_power_3?;
            let mut row = vec![a.metrics.agent_id.clone()];
            row.extend(metric_cells(&a.metrics, format));
            Some((key, row))
        })
        .collect();
    LeaderboardTable::new("Mean Across Submissions", mean_columns(), order_by_key(keyed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SplitMetrics;

    #[test]
    fn ratio_strips_leading_zero() {
        assert_eq!(format_ratio(Some(0.0)), ".00");
        assert_eq!(format_ratio(Some(1.0)), "1.00");
        assert_eq!(format_ratio(Some(0.857)), ".86");
        assert_eq!(format_ratio(None), "-");
    }

    #[test]
    fn ratio_passes_out_of_range_values_through() {
        assert_eq!(format_ratio(Some(1.5)), "1.50");
        assert_eq!(format_ratio(Some(-0.25)), "-.25");
    }

    #[test]
    fn percent_rounds_to_integer() {
        assert_eq!(format_percent(Some(0.857)), "86");
        assert_eq!(format_percent(Some(0.0)), "0");
        assert_eq!(format_percent(Some(1.0)), "100");
        assert_eq!(format_percent(None), "-");
    }

    #[test]
    fn ties_round_away_from_zero_in_every_mode() {
        assert_eq!(format_ratio(Some(0.125)), ".13");
        assert_eq!(format_percent(Some(0.125)), "13");
        assert_eq!(format_time(Some(12.25)), "12.3");
        assert_eq!(format_fixed(Some(31.25), 1), "31.3");
        assert_eq!(format_fixed(Some(-0.125), 2), "-0.13");
        assert_eq!(format_percent(Some(0.005)), "1");
    }

    #[test]
    fn rounding_to_zero_drops_the_sign() {
        assert_eq!(format_ratio(Some(-0.001)), ".00");
        assert_eq!(format_percent(Some(-0.001)), "0");
    }

    #[test]
    fn time_has_one_decimal() {
        assert_eq!(format_time(Some(12.34)), "12.3");
        assert_eq!(format_time(Some(7.0)), "7.0");
        assert_eq!(format_time(None), "-");
    }

    #[test]
    fn score_format_parses() {
        assert_eq!("ratio".parse::<ScoreFormat>(), Ok(ScoreFormat::Ratio));
        assert_eq!("percent".parse::<ScoreFormat>(), Ok(ScoreFormat::Percent));
        assert!("pct".parse::<ScoreFormat>().is_err());
    }

    #[test]
    fn best_columns_layout() {
        let cols = best_columns();
        assert_eq!(cols.len(), 13);
        assert_eq!(cols[0], "Agent ID");
        assert_eq!(cols[1], "Submission #");
        assert_eq!(cols[2], "Overall Pass^3");
        assert_eq!(cols[3], "Base Pass^1");
        assert_eq!(cols[8], "Hallucination Pass@3");
        assert_eq!(cols[12], "Time");
        assert_eq!(mean_columns().len(), 12);
    }

    fn ranked(agent: &str, number: usize, key: f64) -> RankedSubmission {
        RankedSubmission {
            submission_number: number,
            metrics: ExtractedMetrics {
                agent_id: agent.to_string(),
                overall_pass_power_3: Some(key),
                time_used: Some(3.26),
                splits: [SplitMetrics::default(); 3],
            },
        }
    }

    #[test]
    fn best_view_orders_by_key_not_submission_number() {
        let input = vec![
            ranked("A", 1, 0.5),
            ranked("A", 2, 0.1),
            ranked("B", 1, 0.9),
            ranked("B", 2, 0.3),
        ];
        let table = format_best_view(&input, ScoreFormat::Ratio);
        let order: Vec<(&str, &str)> = table
            .rows
            .iter()
            .map(|r| (r[0].as_str(), r[1].as_str()))
            .collect();
        assert_eq!(order, vec![("B", "1"), ("A", "1"), ("B", "2"), ("A", "2")]);
        assert_eq!(table.rows[0][2], ".90");
        assert_eq!(table.rows[0][3], "-");
        assert_eq!(table.rows[0][12], "3.3");
    }
}

//! Leaderboard output artifacts.
//!
//! Provides the table shape handed to rendering layers plus two artifacts:
//! - Markdown tables for PR comments and dashboards
//! - `leaderboard.json` with every table and the snapshot digest

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LeaderboardError, Result};

/// Schema version of [`LeaderboardArtifact`].
pub const SCHEMA_VERSION: &str = "1.0";

/// An ordered table of display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardTable {
    pub title: String,
    pub columns: Vec<String>,
    /// Each row has exactly one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl LeaderboardTable {
    pub fn new(title: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self {
            title: title.into(),
            columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as `(column label, value)` pairs, in column order.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &str)>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }

    /// Value of `column` in row `row`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// Persisted leaderboard artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub input_digest: String,
    pub tables: Vec<LeaderboardTable>,
}

impl LeaderboardArtifact {
    pub fn new(
        input_digest: String,
        tables: Vec<LeaderboardTable>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at,
            input_digest,
            tables,
        }
    }

    /// Artifact stamped with the current time.
    pub fn generated_now(input_digest: String, tables: Vec<LeaderboardTable>) -> Self {
        Self::new(input_digest, tables, Utc::now())
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// Render a table as GitHub-flavoured Markdown.
pub fn render_markdown(table: &LeaderboardTable) -> String {
    let mut out = format!("## {}\n\n", table.title);
    if table.rows.is_empty() {
        out.push_str("No results found.\n");
        return out;
    }

    let header: Vec<String> = table.columns.iter().map(|c| escape_cell(c)).collect();
    out.push_str(&format!("| {} |\n", header.join(" | ")));
    out.push_str(&format!("|{}\n", "---|".repeat(table.columns.len())));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

/// Write the artifact as pretty JSON.
pub fn write_leaderboard_json(path: &Path, artifact: &LeaderboardArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact)?;
    std::fs::write(path, content).map_err(|source| LeaderboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LeaderboardTable {
        LeaderboardTable::new(
            "Best Submission",
            vec!["Agent ID".to_string(), "Overall Pass^3".to_string()],
            vec![
                vec!["A1".to_string(), ".90".to_string()],
                vec!["A|2".to_string(), "-".to_string()],
            ],
        )
    }

    #[test]
    fn markdown_render_is_stable() {
        let expected = "## Best Submission\n\n\
            | Agent ID | Overall Pass^3 |\n\
            |---|---|\n\
            | A1 | .90 |\n\
            | A\\|2 | - |\n";
        assert_eq!(render_markdown(&sample()), expected);
    }

    #[test]
    fn empty_table_renders_placeholder() {
        let table = LeaderboardTable::new("Mean", vec!["Agent ID".to_string()], vec![]);
        assert_eq!(render_markdown(&table), "## Mean\n\nNo results found.\n");
    }

    #[test]
    fn records_pair_labels_with_values() {
        let table = sample();
        let records: Vec<Vec<(&str, &str)>> = table.records().collect();
        assert_eq!(records[0], vec![("Agent ID", "A1"), ("Overall Pass^3", ".90")]);
        assert_eq!(table.cell(1, "Overall Pass^3"), Some("-"));
        assert_eq!(table.cell(5, "Agent ID"), None);
    }

    #[test]
    fn artifact_schema_has_expected_keys() {
        let generated_at = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .expect("parse RFC3339")
            .with_timezone(&Utc);
        let artifact = LeaderboardArtifact::new("abc".to_string(), vec![sample()], generated_at);
        let raw = serde_json::to_value(&artifact).expect("serialize artifact");
        let obj = raw.as_object().expect("artifact object");
        for key in ["schema_version", "generated_at", "input_digest", "tables"] {
            assert!(obj.contains_key(key), "missing key: {key}");
        }
        assert_eq!(raw["tables"][0]["rows"][0][1], ".90");
    }

    #[test]
    fn write_artifact_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("leaderboard.json");
        let artifact = LeaderboardArtifact::generated_now("abc".to_string(), vec![sample()]);
        write_leaderboard_json(&path, &artifact).expect("write");
        let back: LeaderboardArtifact =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(back, artifact);
    }
}

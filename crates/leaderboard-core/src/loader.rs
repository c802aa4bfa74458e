//! Result-directory loader.
//!
//! Reads one JSON document per agent from a results directory and flattens
//! every entry of its `results` array into a [`SubmissionResult`]. All metric
//! fields are optional; gaps become `None` rather than errors. Only a missing
//! directory, an unreadable file or a malformed document aborts the load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::digest::compute_digest;
use crate::domain::{
    LeaderboardError, Result, ResultSet, Split, SplitMetrics, SubmissionResult, TaskReward,
};
use crate::obs;

const PASS_POWER_1: &str = "Pass^1";
const PASS_POWER_3: &str = "Pass^3";
const PASS_AT_1: &str = "Pass@1";
const PASS_AT_3: &str = "Pass@3";

type ScoreMap = BTreeMap<String, Option<f64>>;

#[derive(Debug, Default, Deserialize)]
struct ResultsDocument {
    #[serde(default)]
    participants: Option<Participants>,
    #[serde(default)]
    results: Option<Vec<RawRun>>,
}

#[derive(Debug, Default, Deserialize)]
struct Participants {
    #[serde(default)]
    agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRun {
    pass_rate: Option<f64>,
    time_used: Option<f64>,
    /// Task count; a fraction, a negative or anything past `u64` fails the parse.
    max_score: Option<u64>,
    pass_power_k_scores: ScoreMap,
    pass_power_k_scores_by_split: BTreeMap<String, ScoreMap>,
    pass_at_k_scores_by_split: BTreeMap<String, ScoreMap>,
    detailed_results_by_split: BTreeMap<String, Vec<RawTaskResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTaskResult {
    task_id: Option<serde_json::Value>,
    reward: Option<f64>,
}

fn score(map: Option<&ScoreMap>, key: &str) -> Option<f64> {
    map.and_then(|m| m.get(key).copied().flatten())
}

fn task_id_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl RawRun {
    fn into_submission(self, agent_id: Option<String>) -> SubmissionResult {
        let mut splits = BTreeMap::new();
        for split in Split::ALL {
            let power = self.pass_power_k_scores_by_split.get(split.as_str());
            let at = self.pass_at_k_scores_by_split.get(split.as_str());
            if power.is_none() && at.is_none() {
                continue;
            }
            // Pass^1 and Pass@1 coincide for a single trial.
            let pass_power_1 = score(power, PASS_POWER_1).or_else(|| score(at, PASS_AT_1));
            splits.insert(
                split,
                SplitMetrics {
                    pass_power_1,
                    pass_power_3: score(power, PASS_POWER_3),
                    pass_at_3: score(at, PASS_AT_3),
                },
            );
        }

        for key in self
            .pass_power_k_scores_by_split
            .keys()
            .chain(self.pass_at_k_scores_by_split.keys())
            .chain(self.detailed_results_by_split.keys())
        {
            if Split::from_key(key).is_none() {
                debug!(split = %key, "ignoring unknown split");
            }
        }

        let mut task_rewards = Vec::new();
        for (key, tasks) in self.detailed_results_by_split {
            let Some(split) = Split::from_key(&key) else {
                continue;
            };
            for task in tasks {
                if let Some(task_id) = task.task_id.and_then(task_id_string) {
                    task_rewards.push(TaskReward {
                        split,
                        task_id,
                        reward: task.reward,
                    });
                }
            }
        }

        SubmissionResult {
            agent_id,
            overall_pass_power_3: self.pass_power_k_scores.get(PASS_POWER_3).copied().flatten(),
            time_used: self.time_used,
            pass_rate: self.pass_rate,
            max_score: self.max_score,
            splits,
            task_rewards,
        }
    }
}

/// Parse one results document into its submissions, in array order.
pub fn parse_results_document(content: &str) -> serde_json::Result<Vec<SubmissionResult>> {
    let doc: ResultsDocument = serde_json::from_str(content)?;
    let agent_id = doc.participants.and_then(|p| p.agent);
    Ok(doc
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|run| run.into_submission(agent_id.clone()))
        .collect())
}

/// Load and parse a single results file.
pub fn load_results_file(path: &Path) -> Result<Vec<SubmissionResult>> {
    let content = std::fs::read_to_string(path).map_err(|source| LeaderboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_results_document(&content).map_err(|source| LeaderboardError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON files directly inside `dir`, sorted by path.
fn discover_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| LeaderboardError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every `*.json` document in `dir` into an immutable [`ResultSet`].
///
/// A directory with no JSON files yields an empty set (and a warning), not an
/// error; the views then produce empty tables.
pub fn load_results_dir(dir: &Path) -> Result<ResultSet> {
    if !dir.is_dir() {
        return Err(LeaderboardError::ResultsDirNotFound(dir.to_path_buf()));
    }

    let sources = discover_json_files(dir)?;
    if sources.is_empty() {
        warn!(dir = %dir.display(), "no JSON result files found");
    }

    let mut submissions = Vec::new();
    for path in &sources {
        let loaded = load_results_file(path)?;
        debug!(file = %path.display(), submissions = loaded.len(), "loaded results file");
        submissions.extend(loaded);
    }

    let input_digest = compute_digest(&submissions)?;
    obs::emit_results_loaded(&dir.display().to_string(), sources.len(), submissions.len());

    Ok(ResultSet {
        submissions,
        sources,
        input_digest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_document() {
        let doc = json!({
            "participants": {"agent": "agent-1"},
            "results": [{
                "pass_rate": 62.5,
                "time_used": 120.25,
                "max_score": 40,
                "pass_power_k_scores": {"Pass^1": 0.7, "Pass^3": 0.5},
                "pass_power_k_scores_by_split": {
                    "base": {"Pass^1": 0.8, "Pass^3": 0.6},
                    "hallucination": {"Pass^1": 0.5, "Pass^3": null}
                },
                "pass_at_k_scores_by_split": {
                    "base": {"Pass@1": 0.8, "Pass@3": 0.9}
                },
                "detailed_results_by_split": {
                    "base": [{"task_id": "t1", "reward": 1.0}, {"task_id": 7, "reward": 0.0}]
                }
            }]
        });

        let subs = parse_results_document(&doc.to_string()).expect("parse");
        assert_eq!(subs.len(), 1);
        let sub = &subs[0];
        assert_eq!(sub.agent_id.as_deref(), Some("agent-1"));
        assert_eq!(sub.overall_pass_power_3, Some(0.5));
        assert_eq!(sub.time_used, Some(120.25));
        assert_eq!(sub.pass_rate, Some(62.5));
        assert_eq!(sub.max_score, Some(40));

        let base = sub.split(Split::Base);
        assert_eq!(base.pass_power_1, Some(0.8));
        assert_eq!(base.pass_power_3, Some(0.6));
        assert_eq!(base.pass_at_3, Some(0.9));

        let hallucination = sub.split(Split::Hallucination);
        assert_eq!(hallucination.pass_power_3, None);
        assert_eq!(hallucination.pass_at_3, None);

        assert_eq!(sub.split(Split::Disambiguation), SplitMetrics::default());

        assert_eq!(sub.task_rewards.len(), 2);
        assert_eq!(sub.task_rewards[1].task_id, "7");
    }

    #[test]
    fn pass_power_1_falls_back_to_pass_at_1() {
        let doc = json!({
            "participants": {"agent": "a"},
            "results": [{
                "pass_at_k_scores_by_split": {"disambiguation": {"Pass@1": 0.4}}
            }]
        });
        let subs = parse_results_document(&doc.to_string()).expect("parse");
        assert_eq!(subs[0].split(Split::Disambiguation).pass_power_1, Some(0.4));
    }

    #[test]
    fn missing_participants_keeps_submission_without_agent() {
        let doc = json!({"results": [{"pass_power_k_scores": {"Pass^3": 0.3}}]});
        let subs = parse_results_document(&doc.to_string()).expect("parse");
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].agent_id, None);
    }

    #[test]
    fn unknown_split_is_ignored() {
        let doc = json!({
            "participants": {"agent": "a"},
            "results": [{
                "pass_power_k_scores_by_split": {"adversarial": {"Pass^1": 1.0}},
                "detailed_results_by_split": {"adversarial": [{"task_id": "x", "reward": 1.0}]}
            }]
        });
        let subs = parse_results_document(&doc.to_string()).expect("parse");
        assert!(subs[0].splits.is_empty());
        assert!(subs[0].task_rewards.is_empty());
    }

    #[test]
    fn max_score_must_be_a_non_negative_integer() {
        for bad in ["40.7", "1e20", "-3", "18446744073709551616"] {
            let doc = format!(r#"{{"results": [{{"max_score": {bad}}}]}}"#);
            assert!(parse_results_document(&doc).is_err(), "max_score {bad} accepted");
        }

        let doc = json!({"results": [{"max_score": u64::MAX}]});
        let subs = parse_results_document(&doc.to_string()).expect("parse");
        assert_eq!(subs[0].max_score, Some(u64::MAX));
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_results_document("{\"results\": 5}").is_err());
        assert!(parse_results_document("not json").is_err());
    }
}

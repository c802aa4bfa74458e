//! Error taxonomy for the leaderboard engine.
//!
//! Only load-level failures are errors. A submission without an agent and a
//! metric without a value are expected data sparsity and never surface here.

use std::path::PathBuf;

/// Leaderboard errors.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("results directory not found: {}", .0.display())]
    ResultsDirNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("NaN/Infinity not permitted in canonical JSON")]
    NonFiniteNumber,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for leaderboard operations.
pub type Result<T> = std::result::Result<T, LeaderboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_dir_not_found_display() {
        let err = LeaderboardError::ResultsDirNotFound(PathBuf::from("results"));
        assert_eq!(err.to_string(), "results directory not found: results");
    }

    #[test]
    fn test_parse_error_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LeaderboardError::Parse {
            path: PathBuf::from("results/agent.json"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to parse"));
        assert!(msg.contains("results/agent.json"));
    }
}

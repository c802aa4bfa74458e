//! Leaderboard configuration.
//!
//! Resolution order: built-in defaults, then `leaderboard.toml` (explicit path
//! or the working directory), then the `LEADERBOARD_RESULTS_DIR` environment
//! variable. The CLI applies its own flags last.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{LeaderboardError, Result};
use crate::format::ScoreFormat;
use crate::views::DEFAULT_TASK_LIMIT;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "leaderboard.toml";

/// Environment variable overriding `results_dir`.
pub const RESULTS_DIR_ENV: &str = "LEADERBOARD_RESULTS_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeaderboardConfig {
    /// Directory holding one JSON result document per agent.
    pub results_dir: PathBuf,
    /// Score format of the best-submission view.
    pub best_format: ScoreFormat,
    /// Score format of the mean view.
    pub mean_format: ScoreFormat,
    /// Show only each agent's top submission in the best view.
    pub best_only: bool,
    /// Maximum rows of the task success view.
    pub task_limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            best_format: ScoreFormat::Ratio,
            mean_format: ScoreFormat::Percent,
            best_only: false,
            task_limit: DEFAULT_TASK_LIMIT,
        }
    }
}

impl LeaderboardConfig {
    /// Parse TOML content. `path` is only used for error reporting.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| LeaderboardError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LeaderboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, `leaderboard.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(CONFIG_FILE_NAME).is_file() => {
                Self::from_file(Path::new(CONFIG_FILE_NAME))?
            }
            None => Self::default(),
        };
        Ok(config.with_results_dir_override(std::env::var_os(RESULTS_DIR_ENV)))
    }

    /// Replace `results_dir` when `value` is set and non-empty.
    pub fn with_results_dir_override(mut self, value: Option<OsString>) -> Self {
        if let Some(dir) = value.filter(|v| !v.is_empty()) {
            tracing::debug!(results_dir = ?dir, "results dir overridden from environment");
            self.results_dir = PathBuf::from(dir);
        }
        self
    }
}

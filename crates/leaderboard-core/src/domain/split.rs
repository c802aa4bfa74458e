//! Task category partitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task category a benchmark task belongs to.
///
/// The set is closed. Declaration order is the display order used by every
/// view (`Ord` follows it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Base,
    Hallucination,
    Disambiguation,
}

impl Split {
    /// All splits in display order.
    pub const ALL: [Split; 3] = [Split::Base, Split::Hallucination, Split::Disambiguation];

    /// Key used in result documents (`"base"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Base => "base",
            Split::Hallucination => "hallucination",
            Split::Disambiguation => "disambiguation",
        }
    }

    /// Capitalised name used in column labels.
    pub fn label(self) -> &'static str {
        match self {
            Split::Base => "Base",
            Split::Hallucination => "Hallucination",
            Split::Disambiguation => "Disambiguation",
        }
    }

    /// Parse a result-document key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

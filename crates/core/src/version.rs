//! Ruleset revision flag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Published ruleset revision a game is played under.
///
/// Carried by corporations as a minor-version tag. Nothing in the core
/// engine branches on it; the match controller uses it to pick phase rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameVersion {
    /// The original "1.0" rules.
    #[default]
    V1,
    /// The revised "2.1" rules.
    V2_1,
}

impl GameVersion {
    /// Settings string for this revision.
    pub fn as_str(self) -> &'static str {
        match self {
            GameVersion::V1 => "1.0",
            GameVersion::V2_1 => "2.1",
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

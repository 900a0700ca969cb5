//! Engine settings. Deserialized by the `configs` crate from layered sources.

use serde::{Deserialize, Serialize};

/// Snapshot key used when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "forumPosts";

/// How feed entries are ranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityKey {
    #[default]
    Score,
    /// Score plus the number of top-level comments.
    ScoreAndComments,
}

/// Which score adjustments are allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteMode {
    /// Up and down votes.
    #[default]
    Vote,
    /// Increment-only likes.
    Like,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    pub storage_key: String,
    pub popularity: PopularityKey,
    pub voting: VoteMode,
    pub require_title: bool,
    pub require_topic: bool,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            popularity: PopularityKey::default(),
            voting: VoteMode::default(),
            require_title: true,
            require_topic: true,
        }
    }
}

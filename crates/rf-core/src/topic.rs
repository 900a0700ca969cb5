//! # Topic Vocabulary
//!
//! The closed set of tags a post may carry, their persisted labels and the
//! presentation color each one maps to.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    Technology,
    Politics,
    Sports,
    Culture,
    Science,
    Education,
    Entertainment,
    Health,
    Economy,
    Environment,
}

impl Topic {
    pub const ALL: [Topic; 10] = [
        Topic::Technology,
        Topic::Politics,
        Topic::Sports,
        Topic::Culture,
        Topic::Science,
        Topic::Education,
        Topic::Entertainment,
        Topic::Health,
        Topic::Economy,
        Topic::Environment,
    ];

    /// Machine name, accepted on load alongside the persisted label.
    pub fn name(self) -> &'static str {
        match self {
            Topic::Technology => "technology",
            Topic::Politics => "politics",
            Topic::Sports => "sports",
            Topic::Culture => "culture",
            Topic::Science => "science",
            Topic::Education => "education",
            Topic::Entertainment => "entertainment",
            Topic::Health => "health",
            Topic::Economy => "economy",
            Topic::Environment => "environment",
        }
    }

    /// Display label. This is also the form written to snapshots.
    pub fn label(self) -> &'static str {
        match self {
            Topic::Technology => "Tecnología",
            Topic::Politics => "Política",
            Topic::Sports => "Deportes",
            Topic::Culture => "Cultura",
            Topic::Science => "Ciencia",
            Topic::Education => "Educación",
            Topic::Entertainment => "Entretenimiento",
            Topic::Health => "Salud",
            Topic::Economy => "Economía",
            Topic::Environment => "Medio Ambiente",
        }
    }

    /// Resolves either a display label or a machine name.
    pub fn from_label(raw: &str) -> Option<Topic> {
        let raw = raw.trim();
        Topic::ALL
            .into_iter()
            .find(|t| t.label() == raw || t.name().eq_ignore_ascii_case(raw))
    }

    pub fn color(self) -> TopicColor {
        match self {
            Topic::Technology => TopicColor::Blue,
            Topic::Politics => TopicColor::Orange,
            Topic::Sports => TopicColor::Green,
            Topic::Culture => TopicColor::Purple,
            Topic::Science => TopicColor::Teal,
            Topic::Education => TopicColor::Yellow,
            Topic::Entertainment => TopicColor::Pink,
            Topic::Health => TopicColor::Red,
            Topic::Economy => TopicColor::Indigo,
            Topic::Environment => TopicColor::Emerald,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Topic {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::from_label(s).ok_or_else(|| AppError::ValidationError(format!("unknown topic '{s}'")))
    }
}

impl Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Presentation color bucket for a topic chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicColor {
    Blue,
    Orange,
    Green,
    Purple,
    Teal,
    Yellow,
    Pink,
    Red,
    Indigo,
    Emerald,
    Neutral,
}

impl TopicColor {
    /// Labels outside the vocabulary fall back to `Neutral`.
    pub fn for_label(label: &str) -> TopicColor {
        Topic::from_label(label).map_or(TopicColor::Neutral, Topic::color)
    }
}

/// Removes duplicates while keeping first-selection order.
pub fn dedup_topics(topics: impl IntoIterator<Item = Topic>) -> Vec<Topic> {
    let mut out: Vec<Topic> = Vec::new();
    for topic in topics {
        if !out.contains(&topic) {
            out.push(topic);
        }
    }
    out
}

/// Lenient loader for the `topics` field of a snapshot.
///
/// Absent or null becomes empty, unknown labels are dropped rather than
/// failing the whole snapshot.
pub(crate) fn deserialize_topics<'de, D>(deserializer: D) -> Result<Vec<Topic>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let mut known = Vec::new();
    for label in raw.unwrap_or_default() {
        match Topic::from_label(&label) {
            Some(topic) => known.push(topic),
            None => tracing::warn!(label = %label, "dropping unknown topic from snapshot"),
        }
    }
    Ok(dedup_topics(known))
}

/// The set of topics the feed is currently narrowed to.
///
/// An empty filter retains every post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    selected: Vec<Topic>,
}

impl TopicFilter {
    pub fn new(topics: impl IntoIterator<Item = Topic>) -> Self {
        Self { selected: dedup_topics(topics) }
    }

    /// Adds the topic if absent, removes it otherwise.
    pub fn toggle(&mut self, topic: Topic) {
        if let Some(pos) = self.selected.iter().position(|t| *t == topic) {
            self.selected.remove(pos);
        } else {
            self.selected.push(topic);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, topic: Topic) -> bool {
        self.selected.contains(&topic)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.selected
    }

    /// True when the filter is empty or shares at least one topic with `topics`.
    pub fn matches(&self, topics: &[Topic]) -> bool {
        self.selected.is_empty() || topics.iter().any(|t| self.selected.contains(t))
    }
}

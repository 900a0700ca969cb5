//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Forum.
//! Fresh identifiers are UUID v7 (time-ordered, no same-tick collisions), but ids are
//! kept as opaque strings so snapshots written with older id schemes still load.

use chrono::{DateTime, DurationRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::topic::{deserialize_topics, Topic};

/// Identifier of a post, unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

/// Identifier of a comment, unique within its post's whole forest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl PostId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CommentId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<&str> for CommentId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to user-supplied media attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `blob:` references only resolve inside the session that minted them.
    pub fn is_session_local(&self) -> bool {
        self.0.starts_with("blob:")
    }
}

/// A discussion item: the root of a comment forest.
///
/// Loading goes through a lenient record shape that repairs older snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PostRecord")]
pub struct Post {
    pub id: PostId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(rename = "username")]
    pub author: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Net votes (or likes). Only ever changed through a score adjustment.
    pub score: i64,
    pub topics: Vec<Topic>,
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaRef>,
}

impl Post {
    /// Builds a fresh post from a normalized draft: new id, zero score, no comments.
    pub fn from_draft(draft: PostDraft) -> Self {
        Self {
            id: PostId::generate(),
            title: draft.title,
            content: draft.content,
            author: draft.author,
            created_at: now_millis(),
            score: 0,
            topics: draft.topics,
            comments: Vec::new(),
            image: draft.image,
        }
    }

    /// Number of top-level comments, the figure shown next to a feed entry.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn has_topic(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }
}

/// A node in a post's comment forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CommentRecord")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    #[serde(rename = "username")]
    pub author: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub score: i64,
    /// Direct children, in insertion order.
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn from_draft(draft: CommentDraft) -> Self {
        Self {
            id: CommentId::generate(),
            content: draft.content,
            author: draft.author,
            created_at: now_millis(),
            score: 0,
            replies: Vec::new(),
        }
    }
}

/// User input for a new post, as handed over by the view layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub author: String,
    pub title: Option<String>,
    pub content: String,
    pub topics: Vec<Topic>,
    pub image: Option<MediaRef>,
}

/// User input for a new comment or reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub author: String,
    pub content: String,
}

impl CommentDraft {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self { author: author.into(), content: content.into() }
    }
}

/// Score as written by any snapshot version: `score`, or the older `likes` /
/// `likeCount`. `null` (a serialized NaN) counts as absent.
#[derive(Debug, Deserialize)]
struct LegacyScore {
    #[serde(default)]
    score: Option<i64>,
    #[serde(default)]
    likes: Option<i64>,
    #[serde(default, rename = "likeCount")]
    like_count: Option<i64>,
}

impl LegacyScore {
    fn resolve(self) -> i64 {
        self.score.or(self.likes).or(self.like_count).unwrap_or_default()
    }
}

/// On-disk shape of a post, lenient about fields older snapshots lack.
#[derive(Deserialize)]
struct PostRecord {
    id: PostId,
    #[serde(default)]
    title: Option<String>,
    content: String,
    username: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    score: LegacyScore,
    #[serde(default, deserialize_with = "deserialize_topics")]
    topics: Vec<Topic>,
    #[serde(default, deserialize_with = "null_as_default")]
    comments: Vec<Comment>,
    #[serde(default, deserialize_with = "deserialize_image")]
    image: Option<MediaRef>,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            author: record.username,
            created_at: record.timestamp,
            score: record.score.resolve(),
            topics: record.topics,
            comments: record.comments,
            image: record.image,
        }
    }
}

#[derive(Deserialize)]
struct CommentRecord {
    id: CommentId,
    content: String,
    username: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    score: LegacyScore,
    #[serde(default, deserialize_with = "null_as_default")]
    replies: Vec<Comment>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            content: record.content,
            author: record.username,
            created_at: record.timestamp,
            score: record.score.resolve(),
            replies: record.replies,
        }
    }
}

/// Snapshots store milliseconds, so creation times are truncated to match.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(chrono::Duration::milliseconds(1)).unwrap_or(now)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_image<'de, D>(deserializer: D) -> Result<Option<MediaRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let image = Option::<MediaRef>::deserialize(deserializer)?;
    Ok(image.filter(|media| {
        if media.is_session_local() {
            tracing::warn!(image = %media.as_str(), "dropping session-local image reference");
            false
        } else {
            !media.as_str().is_empty()
        }
    }))
}

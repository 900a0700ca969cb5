//! Draft checks applied before anything reaches the engines.
//!
//! The engines trust their input; these functions are what the view layer
//! (and [`crate::Forum`]) use to keep invalid drafts out.

use crate::config::{ForumConfig, VoteMode};
use crate::error::{AppError, Result};
use crate::models::{CommentDraft, PostDraft};
use crate::topic::dedup_topics;

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trims text fields, de-duplicates topics and rejects incomplete drafts.
pub fn normalize_post_draft(draft: PostDraft, config: &ForumConfig) -> Result<PostDraft> {
    let author = required("author", &draft.author)?;
    let content = required("content", &draft.content)?;

    let title = draft
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    if config.require_title && title.is_none() {
        return Err(AppError::ValidationError("title must not be empty".to_string()));
    }

    let topics = dedup_topics(draft.topics);
    if config.require_topic && topics.is_empty() {
        return Err(AppError::ValidationError("select at least one topic".to_string()));
    }

    Ok(PostDraft { author, title, content, topics, image: draft.image })
}

pub fn normalize_comment_draft(draft: CommentDraft) -> Result<CommentDraft> {
    Ok(CommentDraft {
        author: required("author", &draft.author)?,
        content: required("content", &draft.content)?,
    })
}

/// Likes only ever go up.
pub fn check_delta(delta: i64, mode: VoteMode) -> Result<()> {
    if mode == VoteMode::Like && delta < 0 {
        return Err(AppError::ValidationError(format!(
            "likes are increment-only, got delta {delta}"
        )));
    }
    Ok(())
}

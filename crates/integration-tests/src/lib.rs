//! Shared fixtures for the cross-crate tests under `tests/`.

use rf_core::{PostDraft, Topic};

/// A post draft that passes validation under the default config.
pub fn post_draft(author: &str, topics: &[Topic]) -> PostDraft {
    PostDraft {
        author: author.to_string(),
        title: Some(format!("{author} asks")),
        content: format!("{author} has something to say"),
        topics: topics.to_vec(),
        image: None,
    }
}

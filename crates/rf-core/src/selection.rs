//! # Selection Cache
//!
//! Tracks which post the detail view has open. Only the id is held; the post
//! itself is looked up in the canonical collection on every read, so a score
//! change or a new reply is visible immediately and the view can never show a
//! stale copy.

use crate::collection::PostCollection;
use crate::models::{Post, PostId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    focused: Option<PostId>,
}

impl Selection {
    pub fn focus(&mut self, id: PostId) {
        self.focused = Some(id);
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    pub fn focused_id(&self) -> Option<&PostId> {
        self.focused.as_ref()
    }

    /// The focused post as it currently stands in `collection`.
    pub fn current<'a>(&self, collection: &'a PostCollection) -> Option<&'a Post> {
        self.focused.as_ref().and_then(|id| collection.find(id))
    }

    /// Re-derives the selection after a mutation.
    ///
    /// Nothing to do when no post is focused. A focus whose post no longer
    /// exists in `collection` is dropped. Returns the post now on display.
    pub fn resync<'a>(&mut self, collection: &'a PostCollection) -> Option<&'a Post> {
        let id = self.focused.as_ref()?;
        let current = collection.find(id);
        if current.is_none() {
            tracing::warn!(post_id = %id, "focused post vanished, clearing selection");
            self.focused = None;
        }
        current
    }
}

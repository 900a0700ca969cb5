//! # Post Collection Engine
//!
//! The canonical list of posts, most recent first. All operations are pure:
//! they borrow the current collection and return the next one, leaving the
//! original intact when a lookup misses.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Comment, CommentDraft, CommentId, Post, PostDraft, PostId};
use crate::tree;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == *id)
    }

    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }

    /// Prepends a post built from an already-validated draft.
    ///
    /// Storage order is newest first; popularity ordering is a view concern.
    pub fn create_post(&self, draft: PostDraft) -> (Self, PostId) {
        let post = Post::from_draft(draft);
        let id = post.id.clone();
        let mut posts = Vec::with_capacity(self.posts.len() + 1);
        posts.push(post);
        posts.extend(self.posts.iter().cloned());
        (Self { posts }, id)
    }

    pub fn adjust_post_score(&self, post_id: &PostId, delta: i64) -> Result<Self> {
        self.update_post(post_id, |post| {
            post.score = tree::apply_delta(post.score, delta)?;
            Ok(())
        })
    }

    /// Attaches a new comment to a post, either top-level or as a reply to `target`.
    pub fn insert_comment(
        &self,
        post_id: &PostId,
        target: Option<&CommentId>,
        draft: CommentDraft,
    ) -> Result<(Self, CommentId)> {
        let comment = Comment::from_draft(draft);
        let comment_id = comment.id.clone();
        let next = self.update_post(post_id, |post| {
            post.comments = tree::insert_comment(&post.comments, target, comment)?;
            Ok(())
        })?;
        Ok((next, comment_id))
    }

    pub fn adjust_comment_score(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
        delta: i64,
        parent: Option<&CommentId>,
    ) -> Result<Self> {
        self.update_post(post_id, |post| {
            post.comments = tree::adjust_score(&post.comments, comment_id, delta, parent)?;
            Ok(())
        })
    }

    /// Copies the collection and applies `apply` to the matching post.
    /// Nothing is returned on failure, so the caller keeps its current value.
    fn update_post<F>(&self, post_id: &PostId, apply: F) -> Result<Self>
    where
        F: FnOnce(&mut Post) -> Result<()>,
    {
        let mut posts = self.posts.clone();
        let post = posts
            .iter_mut()
            .find(|p| p.id == *post_id)
            .ok_or_else(|| AppError::post_not_found(post_id))?;
        apply(post)?;
        Ok(Self { posts })
    }
}

impl From<Vec<Post>> for PostCollection {
    fn from(posts: Vec<Post>) -> Self {
        Self::new(posts)
    }
}

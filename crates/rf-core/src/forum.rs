//! # Forum
//!
//! The mutation API the view layer talks to. Each intent runs the same
//! pipeline: validate, apply the pure engine operation, persist the full
//! snapshot, resync the selection. The view then rerenders from
//! [`Forum::feed`] and [`Forum::selected`].
//!
//! The in-memory collection is authoritative. A failed snapshot write does not
//! roll back the mutation; the forum stays dirty until a later write succeeds.

use crate::collection::PostCollection;
use crate::config::ForumConfig;
use crate::error::{AppError, Result};
use crate::models::{CommentDraft, CommentId, Post, PostDraft, PostId};
use crate::selection::Selection;
use crate::snapshot::SnapshotStore;
use crate::topic::{Topic, TopicFilter};
use crate::traits::BlobStore;
use crate::validation::{check_delta, normalize_comment_draft, normalize_post_draft};
use crate::view::{FeedQuery, FeedView};

pub struct Forum<S> {
    snapshots: SnapshotStore<S>,
    config: ForumConfig,
    posts: PostCollection,
    selection: Selection,
    query: FeedQuery,
    dirty: bool,
    last_persist_error: Option<String>,
}

impl<S: BlobStore> Forum<S> {
    /// Loads the snapshot stored under `config.storage_key`.
    pub fn open(store: S, config: ForumConfig) -> Result<Self> {
        let snapshots = SnapshotStore::new(store, config.storage_key.clone());
        let posts = snapshots.load()?;
        Ok(Self {
            snapshots,
            config,
            posts,
            selection: Selection::default(),
            query: FeedQuery::default(),
            dirty: false,
            last_persist_error: None,
        })
    }

    pub fn config(&self) -> &ForumConfig {
        &self.config
    }

    pub fn posts(&self) -> &PostCollection {
        &self.posts
    }

    pub fn store(&self) -> &S {
        self.snapshots.inner()
    }

    // ── Mutations ──────────────────────────────────────────────────────────

    pub fn create_post(&mut self, draft: PostDraft) -> Result<PostId> {
        let draft = normalize_post_draft(draft, &self.config)?;
        let (next, id) = self.posts.create_post(draft);
        tracing::debug!(post_id = %id, "post created");
        self.commit(next);
        Ok(id)
    }

    pub fn adjust_post_score(&mut self, post_id: &PostId, delta: i64) -> Result<()> {
        check_delta(delta, self.config.voting)?;
        let next = self.posts.adjust_post_score(post_id, delta).inspect_err(log_miss)?;
        tracing::debug!(post_id = %post_id, delta, "post score adjusted");
        self.commit(next);
        Ok(())
    }

    /// Adds a top-level comment (`parent == None`) or a reply to `parent`.
    pub fn add_comment(
        &mut self,
        post_id: &PostId,
        parent: Option<&CommentId>,
        draft: CommentDraft,
    ) -> Result<CommentId> {
        let draft = normalize_comment_draft(draft)?;
        let (next, id) = self
            .posts
            .insert_comment(post_id, parent, draft)
            .inspect_err(log_miss)?;
        tracing::debug!(post_id = %post_id, comment_id = %id, reply = parent.is_some(), "comment added");
        self.commit(next);
        Ok(id)
    }

    pub fn adjust_comment_score(
        &mut self,
        post_id: &PostId,
        comment_id: &CommentId,
        delta: i64,
        parent: Option<&CommentId>,
    ) -> Result<()> {
        check_delta(delta, self.config.voting)?;
        let next = self
            .posts
            .adjust_comment_score(post_id, comment_id, delta, parent)
            .inspect_err(log_miss)?;
        tracing::debug!(post_id = %post_id, comment_id = %comment_id, delta, "comment score adjusted");
        self.commit(next);
        Ok(())
    }

    // ── Feed ───────────────────────────────────────────────────────────────

    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    pub fn set_topic_filter(&mut self, filter: TopicFilter) {
        self.query.topics = filter;
    }

    pub fn toggle_topic_filter(&mut self, topic: Topic) {
        self.query.topics.toggle(topic);
    }

    pub fn clear_topic_filter(&mut self) {
        self.query.topics.clear();
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.query.search = search;
    }

    /// The ranked, filtered feed as it stands now.
    pub fn feed(&self) -> FeedView<'_> {
        self.posts.derive_view(&self.query, self.config.popularity)
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn select(&mut self, post_id: &PostId) -> Result<&Post> {
        if self.posts.find(post_id).is_none() {
            return Err(AppError::post_not_found(post_id));
        }
        self.selection.focus(post_id.clone());
        self.selection
            .current(&self.posts)
            .ok_or_else(|| AppError::post_not_found(post_id))
    }

    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> Option<&Post> {
        self.selection.current(&self.posts)
    }

    // ── Persistence ────────────────────────────────────────────────────────

    /// True while the last snapshot write failed and nothing has succeeded since.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Retries a failed snapshot write. A clean forum is left alone.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.snapshots.save(&self.posts).inspect_err(|err| {
            self.last_persist_error = Some(err.to_string());
        })?;
        self.dirty = false;
        self.last_persist_error = None;
        Ok(())
    }

    fn commit(&mut self, next: PostCollection) {
        self.posts = next;
        match self.snapshots.save(&self.posts) {
            Ok(()) => {
                self.dirty = false;
                self.last_persist_error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, key = %self.snapshots.key(), "snapshot write failed, keeping in-memory state");
                self.dirty = true;
                self.last_persist_error = Some(err.to_string());
            }
        }
        self.selection.resync(&self.posts);
    }
}

fn log_miss(err: &AppError) {
    if err.is_not_found() {
        tracing::warn!(error = %err, "mutation target not found");
    }
}

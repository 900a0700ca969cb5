//! # Feed View
//!
//! Read-side projection of a [`PostCollection`]: ranked by popularity, narrowed
//! by topic and free-text search. Deriving a view never mutates the collection.

use std::cmp::Reverse;

use crate::collection::PostCollection;
use crate::config::PopularityKey;
use crate::models::Post;
use crate::topic::{Topic, TopicFilter};

/// What the feed is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub topics: TopicFilter,
    /// Case-insensitive substring over title, content and author.
    pub search: Option<String>,
}

impl FeedQuery {
    pub fn topics(topics: impl IntoIterator<Item = Topic>) -> Self {
        Self { topics: TopicFilter::new(topics), search: None }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.topics.matches(&post.topics) && self.matches_search(post)
    }

    fn matches_search(&self, post: &Post) -> bool {
        let needle = match self.search.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return true,
        };
        let hit = |field: &str| field.to_lowercase().contains(&needle);
        post.title.as_deref().is_some_and(hit) || hit(&post.content) || hit(&post.author)
    }
}

impl PopularityKey {
    pub fn rank(self, post: &Post) -> i64 {
        match self {
            PopularityKey::Score => post.score,
            PopularityKey::ScoreAndComments => {
                post.score.saturating_add(i64::try_from(post.comment_count()).unwrap_or(i64::MAX))
            }
        }
    }
}

/// A ranked, filtered window over a collection.
///
/// The ranking is computed once; [`FeedView::iter`] can be called any number of
/// times and applies the query lazily.
#[derive(Debug, Clone)]
pub struct FeedView<'a> {
    posts: &'a [Post],
    order: Vec<usize>,
    query: &'a FeedQuery,
}

impl<'a> FeedView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Post> + Clone + '_ {
        let posts = self.posts;
        let query = self.query;
        self.order
            .iter()
            .map(move |&i| &posts[i])
            .filter(move |post| query.matches(post))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<Post> {
        self.iter().cloned().collect()
    }
}

impl PostCollection {
    /// Ranks posts by `key`, highest first. Ties keep storage order (stable sort).
    pub fn derive_view<'a>(&'a self, query: &'a FeedQuery, key: PopularityKey) -> FeedView<'a> {
        let posts = self.posts();
        let mut order: Vec<usize> = (0..posts.len()).collect();
        order.sort_by_key(|&i| Reverse(key.rank(&posts[i])));
        FeedView { posts, order, query }
    }
}

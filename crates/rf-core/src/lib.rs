//! rusty-forum/crates/rf-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Forum:
//! the comment tree and post collection engines, the feed view, the
//! selection cache and the snapshot store, tied together by [`Forum`].

pub mod collection;
pub mod config;
pub mod error;
pub mod forum;
pub mod models;
pub mod selection;
pub mod snapshot;
pub mod topic;
pub mod traits;
pub mod tree;
pub mod validation;
pub mod view;

// Re-exporting for easier access in other crates
pub use collection::PostCollection;
pub use config::{ForumConfig, PopularityKey, VoteMode, DEFAULT_STORAGE_KEY};
pub use error::*;
pub use forum::Forum;
pub use models::*;
pub use selection::Selection;
pub use snapshot::SnapshotStore;
pub use topic::{Topic, TopicColor, TopicFilter};
pub use traits::*;
pub use view::{FeedQuery, FeedView};

//! # Snapshot Store
//!
//! (De)serializes the whole post collection to a single named blob.
//! Older snapshots are repaired on load by the serde defaults on the models:
//! missing comments, topics, score and image are filled in rather than rejected.

use crate::collection::PostCollection;
use crate::error::Result;
use crate::models::Post;
use crate::traits::BlobStore;

pub struct SnapshotStore<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> SnapshotStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Reads the snapshot. A missing or blank blob yields an empty collection.
    pub fn load(&self) -> Result<PostCollection> {
        match self.store.read_blob(&self.key)? {
            Some(blob) if !blob.trim().is_empty() => {
                let collection = decode(&blob)?;
                tracing::info!(key = %self.key, posts = collection.len(), "snapshot loaded");
                Ok(collection)
            }
            _ => {
                tracing::info!(key = %self.key, "no snapshot found, starting empty");
                Ok(PostCollection::default())
            }
        }
    }

    /// Writes the full collection, replacing whatever was stored before.
    pub fn save(&self, collection: &PostCollection) -> Result<()> {
        let blob = encode(collection)?;
        self.store.write_blob(&self.key, &blob)?;
        tracing::debug!(key = %self.key, posts = collection.len(), bytes = blob.len(), "snapshot saved");
        Ok(())
    }
}

pub fn encode(collection: &PostCollection) -> Result<String> {
    Ok(serde_json::to_string(collection.posts())?)
}

pub fn decode(blob: &str) -> Result<PostCollection> {
    let posts: Option<Vec<Post>> = serde_json::from_str(blob)?;
    Ok(PostCollection::new(posts.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{CommentDraft, PostDraft};
    use crate::topic::Topic;
    use crate::traits::MockBlobStore;

    fn sample() -> PostCollection {
        let (c, id) = PostCollection::default().create_post(PostDraft {
            author: "Ana".to_string(),
            title: Some("t".to_string()),
            content: "c".to_string(),
            topics: vec![Topic::Science, Topic::Environment],
            image: None,
        });
        let (c, leo) = c.insert_comment(&id, None, CommentDraft::new("Leo", "Hi")).unwrap();
        let (c, _) = c.insert_comment(&id, Some(&leo), CommentDraft::new("Mia", "Re")).unwrap();
        c.adjust_post_score(&id, 3).unwrap()
    }

    #[test]
    fn test_encode_decode_preserves_everything() {
        let original = sample();
        let back = decode(&encode(&original).unwrap()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_wire_field_names() {
        let json: serde_json::Value = serde_json::from_str(&encode(&sample()).unwrap()).unwrap();
        let post = &json[0];
        assert_eq!(post["username"], "Ana");
        assert!(post["timestamp"].is_i64());
        assert_eq!(post["topics"][1], "Medio Ambiente");
        assert_eq!(post["comments"][0]["replies"][0]["username"], "Mia");
    }

    #[test]
    fn test_missing_blob_is_empty() {
        let mut store = MockBlobStore::new();
        store.expect_read_blob().returning(|_| Ok(None));
        let snapshots = SnapshotStore::new(store, "forumPosts");
        assert!(snapshots.load().unwrap().is_empty());
    }

    #[test]
    fn test_null_blob_is_empty() {
        assert!(decode("null").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let mut store = MockBlobStore::new();
        store.expect_read_blob().returning(|_| Ok(Some("{not json".to_string())));
        let snapshots = SnapshotStore::new(store, "forumPosts");
        assert!(matches!(snapshots.load(), Err(AppError::Serialization(_))));
    }

    #[test]
    fn test_save_writes_under_key() {
        let mut store = MockBlobStore::new();
        store
            .expect_write_blob()
            .withf(|key, blob| key == "forumPosts" && blob.starts_with('['))
            .times(1)
            .returning(|_, _| Ok(()));
        SnapshotStore::new(store, "forumPosts").save(&sample()).unwrap();
    }
}

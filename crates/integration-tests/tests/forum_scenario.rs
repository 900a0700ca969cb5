//! End-to-end walk through the forum API against an in-memory store.

use integration_tests::post_draft;
use rf_core::{BlobStore, CommentDraft, Forum, ForumConfig, PostId, Topic};
use rf_store_local::MemoryBlobStore;
use std::sync::Arc;

#[test]
fn test_vote_comment_reply_scenario() {
    let store = Arc::new(MemoryBlobStore::new());
    let mut forum = Forum::open(Arc::clone(&store), ForumConfig::default()).unwrap();

    let p1 = forum.create_post(post_draft("Ana", &[Topic::Science])).unwrap();
    assert_eq!(forum.posts().find(&p1).unwrap().score, 0);

    forum.adjust_post_score(&p1, 1).unwrap();
    assert_eq!(forum.posts().find(&p1).unwrap().score, 1);

    let leo = forum.add_comment(&p1, None, CommentDraft::new("Leo", "Hi")).unwrap();
    let post = forum.posts().find(&p1).unwrap();
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].score, 0);

    forum.adjust_comment_score(&p1, &leo, -1, None).unwrap();
    assert_eq!(forum.posts().find(&p1).unwrap().comments[0].score, -1);

    let mia = forum.add_comment(&p1, Some(&leo), CommentDraft::new("Mia", "Re")).unwrap();
    let leo_comment = &forum.posts().find(&p1).unwrap().comments[0];
    assert_eq!(leo_comment.replies.len(), 1);
    assert_eq!(leo_comment.replies[0].id, mia);
    assert_eq!(leo_comment.replies[0].author, "Mia");

    // A fresh forum over the same store sees exactly what was persisted.
    let reopened = Forum::open(Arc::clone(&store), ForumConfig::default()).unwrap();
    assert_eq!(reopened.posts(), forum.posts());
}

#[test]
fn test_lookup_miss_changes_nothing() {
    let store = Arc::new(MemoryBlobStore::new());
    let mut forum = Forum::open(Arc::clone(&store), ForumConfig::default()).unwrap();
    let p1 = forum.create_post(post_draft("Ana", &[Topic::Culture])).unwrap();
    let before = forum.posts().clone();
    let persisted_before = forum.store().read_blob("forumPosts").unwrap();

    let missing = PostId::from("does-not-exist");
    assert!(forum.adjust_post_score(&missing, 1).unwrap_err().is_not_found());
    assert!(forum
        .add_comment(&p1, Some(&"nope".into()), CommentDraft::new("Leo", "Hi"))
        .unwrap_err()
        .is_not_found());
    assert!(forum
        .adjust_comment_score(&p1, &"nope".into(), 1, None)
        .unwrap_err()
        .is_not_found());

    assert_eq!(forum.posts(), &before);
    assert_eq!(forum.store().read_blob("forumPosts").unwrap(), persisted_before);
}

#[test]
fn test_detail_view_never_goes_stale() {
    let mut forum = Forum::open(MemoryBlobStore::new(), ForumConfig::default()).unwrap();
    let p1 = forum.create_post(post_draft("Ana", &[Topic::Health])).unwrap();
    let p2 = forum.create_post(post_draft("Leo", &[Topic::Health])).unwrap();
    forum.select(&p1).unwrap();

    forum.adjust_post_score(&p2, 5).unwrap();
    forum.adjust_post_score(&p1, 2).unwrap();
    let c = forum.add_comment(&p1, None, CommentDraft::new("Mia", "Hola")).unwrap();
    forum.adjust_comment_score(&p1, &c, 1, None).unwrap();

    let shown = forum.selected().unwrap();
    assert_eq!(shown.id, p1);
    assert_eq!(shown.score, 2);
    assert_eq!(shown.comments[0].score, 1);
}

//! # Comment Tree Engine
//!
//! Pure operations over a post's comment forest. Every mutation takes the forest
//! by reference and hands back a new one; the input is never touched, so a failed
//! lookup leaves the caller holding exactly what it had.
//!
//! Lookup is recursive: a reply can target a comment at any depth, even though
//! the view only drives two levels (comment, reply-to-comment).

use crate::error::{AppError, Result};
use crate::models::{Comment, CommentId};

/// Locates a comment anywhere in the forest.
pub fn find<'a>(forest: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
    for node in forest {
        if node.id == *id {
            return Some(node);
        }
        if let Some(found) = find(&node.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Mutable counterpart of [`find`], used on the working copy of a forest.
pub fn find_mut<'a>(forest: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
    for node in forest.iter_mut() {
        if node.id == *id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Counts every node, nested replies included.
pub fn total_count(forest: &[Comment]) -> usize {
    forest.iter().map(|c| 1 + total_count(&c.replies)).sum()
}

/// Appends `comment` to the top level (`target == None`) or to the replies of
/// the comment with id `target`.
pub fn insert_comment(
    forest: &[Comment],
    target: Option<&CommentId>,
    comment: Comment,
) -> Result<Vec<Comment>> {
    let mut next = forest.to_vec();
    match target {
        None => next.push(comment),
        Some(parent_id) => {
            let parent = find_mut(&mut next, parent_id)
                .ok_or_else(|| AppError::comment_not_found(parent_id))?;
            parent.replies.push(comment);
        }
    }
    Ok(next)
}

/// Adds `delta` to a comment's score. No clamping: scores may go negative.
///
/// With `parent == None` the id is matched anywhere in the forest. With
/// `Some(parent)` only that parent's direct replies are considered.
pub fn adjust_score(
    forest: &[Comment],
    comment_id: &CommentId,
    delta: i64,
    parent: Option<&CommentId>,
) -> Result<Vec<Comment>> {
    let mut next = forest.to_vec();
    let node = match parent {
        None => find_mut(&mut next, comment_id),
        Some(parent_id) => find_mut(&mut next, parent_id)
            .ok_or_else(|| AppError::comment_not_found(parent_id))?
            .replies
            .iter_mut()
            .find(|reply| reply.id == *comment_id),
    }
    .ok_or_else(|| AppError::comment_not_found(comment_id))?;

    node.score = apply_delta(node.score, delta)?;
    Ok(next)
}

/// Adds `delta` to `score`, refusing results that do not fit in an `i64`.
pub(crate) fn apply_delta(score: i64, delta: i64) -> Result<i64> {
    score.checked_add(delta).ok_or_else(|| {
        AppError::ValidationError(format!("score {score} cannot absorb delta {delta}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentDraft;

    fn comment(author: &str) -> Comment {
        Comment::from_draft(CommentDraft::new(author, "text"))
    }

    #[test]
    fn test_top_level_insert_appends() {
        let a = comment("a");
        let b = comment("b");
        let forest = vec![a.clone()];

        let next = insert_comment(&forest, None, b.clone()).unwrap();

        assert_eq!(next, vec![a, b]);
        assert_eq!(forest.len(), 1, "input forest must not change");
    }

    #[test]
    fn test_reply_lands_on_target_only() {
        let a = comment("a");
        let sibling = comment("s");
        let r = comment("r");
        let forest = vec![a.clone(), sibling.clone()];

        let next = insert_comment(&forest, Some(&a.id), r.clone()).unwrap();

        assert_eq!(next[0].replies, vec![r]);
        assert_eq!(next[1], sibling);
    }

    #[test]
    fn test_reply_to_nested_reply() {
        let mut a = comment("a");
        let r1 = comment("r1");
        a.replies.push(r1.clone());
        let deep = comment("deep");

        let next = insert_comment(&[a], Some(&r1.id), deep.clone()).unwrap();

        assert_eq!(next[0].replies[0].replies, vec![deep]);
        assert_eq!(total_count(&next), 3);
    }

    #[test]
    fn test_missing_target_is_not_found() {
        let forest = vec![comment("a")];
        let err = insert_comment(&forest, Some(&CommentId::from("nope")), comment("x")).unwrap_err();
        assert!(err.is_not_found());

        let err = adjust_score(&forest, &CommentId::from("nope"), 1, None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_adjust_score_goes_negative() {
        let a = comment("a");
        let forest = vec![a.clone()];
        let next = adjust_score(&forest, &a.id, -1, None).unwrap();
        let next = adjust_score(&next, &a.id, -1, None).unwrap();
        assert_eq!(find(&next, &a.id).unwrap().score, -2);
        assert_eq!(forest[0].score, 0);
    }

    #[test]
    fn test_adjust_score_through_parent() {
        let mut a = comment("a");
        let r = comment("r");
        a.replies.push(r.clone());
        let forest = vec![a.clone()];

        let next = adjust_score(&forest, &r.id, 1, Some(&a.id)).unwrap();
        assert_eq!(next[0].replies[0].score, 1);
        assert_eq!(next[0].score, 0);

        // the reply is not a direct child of itself
        let err = adjust_score(&forest, &a.id, 1, Some(&r.id)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_score_accumulates_regardless_of_order() {
        let a = comment("a");
        let deltas = [3, -1, 4, -1, -5, 9];

        let mut forward = vec![a.clone()];
        for d in deltas {
            forward = adjust_score(&forward, &a.id, d, None).unwrap();
        }
        let mut backward = vec![a.clone()];
        for d in deltas.iter().rev() {
            backward = adjust_score(&backward, &a.id, *d, None).unwrap();
        }

        let expected: i64 = deltas.iter().sum();
        assert_eq!(forward[0].score, expected);
        assert_eq!(backward[0].score, expected);
    }

    #[test]
    fn test_score_overflow_is_rejected() {
        let a = comment("a");
        let forest = adjust_score(&[a.clone()], &a.id, i64::MAX, None).unwrap();

        let err = adjust_score(&forest, &a.id, 1, None).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(forest[0].score, i64::MAX);

        let low = adjust_score(&[a.clone()], &a.id, i64::MIN, None).unwrap();
        assert!(adjust_score(&low, &a.id, -1, None).is_err());
    }
}

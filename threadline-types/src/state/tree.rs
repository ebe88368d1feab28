//! Lookup and in-place update of comments by id, at any depth.
//!
//! Every reducer that touches a single node (hide, show, like, delete, edit)
//! goes through these helpers instead of walking `comments` and `replies`
//! itself.

use super::comment::Comment;
use crate::CommentId;

pub fn find_comment<'a>(comments: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
    for comment in comments {
        if &comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_comment(&comment.replies, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_comment_mut<'a>(comments: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
    for comment in comments.iter_mut() {
        if &comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_comment_mut(&mut comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Apply `f` to the node with the given id. Returns false if no node matched.
pub fn update_comment<F>(comments: &mut [Comment], id: &CommentId, f: F) -> bool
where
    F: FnOnce(&mut Comment),
{
    match find_comment_mut(comments, id) {
        Some(comment) => {
            f(comment);
            true
        }
        None => false,
    }
}

/// Replace the node with `replacement.id`. Returns the previous node.
pub fn replace_comment(comments: &mut [Comment], replacement: Comment) -> Option<Comment> {
    let slot = find_comment_mut(comments, &replacement.id)?;
    Some(std::mem::replace(slot, replacement))
}

/// Replace a reply inside one specific parent only.
pub fn replace_reply(comments: &mut [Comment], parent_id: &CommentId, replacement: Comment) -> Option<Comment> {
    let parent = comments.iter_mut().find(|c| &c.id == parent_id)?;
    let slot = parent.replies.iter_mut().find(|r| r.id == replacement.id)?;
    Some(std::mem::replace(slot, replacement))
}

/// Append `incoming` to `target`, skipping ids already present.
/// Returns how many records were appended.
pub fn append_unique(target: &mut Vec<Comment>, incoming: Vec<Comment>) -> usize {
    let before = target.len();
    for comment in incoming {
        if !target.iter().any(|c| c.id == comment.id) {
            target.push(comment);
        }
    }
    target.len() - before
}

/// Number of published nodes, top-level and nested.
pub fn visible_total(comments: &[Comment]) -> i64 {
    comments
        .iter()
        .map(|c| i64::from(c.is_visible()) + visible_total(&c.replies))
        .sum()
}

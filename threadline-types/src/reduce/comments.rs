use crate::state::tree;
use crate::{Comment, CommentId, CommentStatus, CommentsState, Outcome};

pub(super) fn reduce(outcome: &Outcome, state: &mut CommentsState) {
    match outcome {
        Outcome::CommentsPage { comments, pagination } => {
            // Older pages go to the end; newest-first storage.
            tree::append_unique(&mut state.comments, comments.clone());
            if let Some(pagination) = pagination {
                state.pagination = Some(*pagination);
            }
        }
        Outcome::RepliesPage { comment_id, replies } => {
            if let Some(parent) = top_level_mut(state, comment_id) {
                tree::append_unique(&mut parent.replies, replies.clone());
            }
        }
        Outcome::CommentAdded(comment) => {
            if tree::replace_comment(&mut state.comments, comment.clone()).is_none() {
                state.comments.insert(0, comment.clone());
            }
            state.comment_count += 1;
        }
        Outcome::ReplyAdded { parent_id, reply } => {
            if let Some(parent) = top_level_mut(state, parent_id) {
                if !parent.replies.iter().any(|r| r.id == reply.id) {
                    parent.replies.push(reply.clone());
                }
                parent.count.replies += 1;
            }
            state.comment_count += 1;
        }
        Outcome::CommentHidden(id) => {
            let previous = set_status(&mut state.comments, id, CommentStatus::Hidden);
            state.comment_count += visibility_delta(previous, false);
        }
        Outcome::CommentDeleted(id) => {
            let previous = set_status(&mut state.comments, id, CommentStatus::Deleted);
            state.comment_count += visibility_delta(previous, false);
        }
        Outcome::CommentShown(comment) => {
            let previous = tree::replace_comment(&mut state.comments, comment.clone()).map(|c| c.status);
            state.comment_count += visibility_delta(previous, true);
        }
        Outcome::LikeChanged { comment_id, liked } => {
            tree::update_comment(&mut state.comments, comment_id, |c| {
                if c.liked != *liked {
                    c.liked = *liked;
                    c.count.likes += if *liked { 1 } else { -1 };
                }
            });
        }
        Outcome::CommentEdited { comment, parent_id } => match parent_id {
            Some(parent_id) => {
                tree::replace_reply(&mut state.comments, parent_id, comment.clone());
            }
            None => {
                if let Some(slot) = top_level_mut(state, &comment.id) {
                    *slot = comment.clone();
                }
            }
        },
        Outcome::CommentReported(_) | Outcome::MemberUpdated(_) | Outcome::MemberUpdateFailed(_) => {}
    }
}

fn top_level_mut<'a>(state: &'a mut CommentsState, id: &CommentId) -> Option<&'a mut Comment> {
    state.comments.iter_mut().find(|c| &c.id == id)
}

/// Set the status of a node at any depth. Returns the previous status, or
/// None if the node is not loaded.
fn set_status(comments: &mut [Comment], id: &CommentId, status: CommentStatus) -> Option<CommentStatus> {
    let node = tree::find_comment_mut(comments, id)?;
    Some(std::mem::replace(&mut node.status, status))
}

/// Change to `comment_count` for a confirmed visibility transition.
///
/// Nodes that are not loaded locally count as a real transition.
fn visibility_delta(previous: Option<CommentStatus>, now_visible: bool) -> i64 {
    match previous {
        None if now_visible => 1,
        None => -1,
        Some(prev) => match (prev.is_visible(), now_visible) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommentCount, Pagination};

    fn reply(id: &str) -> Comment {
        let mut r = Comment::new(id, id);
        r.parent_id = Some(CommentId::new("a"));
        r
    }

    /// a (likes 2) -> [a1, a2], b
    fn state() -> CommentsState {
        let mut a = Comment::new("a", "A");
        a.count = CommentCount { likes: 2, replies: 3 };
        a.replies = vec![reply("a1"), reply("a2")];
        let b = Comment::new("b", "B");
        CommentsState {
            comments: vec![a, b],
            comment_count: 4,
            pagination: Some(Pagination { page: 1, pages: 2, ..Pagination::default() }),
            ..CommentsState::new("post")
        }
    }

    fn ids(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn comments_page_appends_and_replaces_pagination() {
        let mut s = state();
        let page = Pagination { page: 2, pages: 2, ..Pagination::default() };
        reduce(
            &Outcome::CommentsPage { comments: vec![Comment::new("c", "C")], pagination: Some(page) },
            &mut s,
        );
        assert_eq!(ids(&s.comments), ["a", "b", "c"]);
        assert_eq!(s.pagination, Some(page));
    }

    #[test]
    fn comments_page_skips_already_loaded_ids() {
        let mut s = state();
        reduce(
            &Outcome::CommentsPage {
                comments: vec![Comment::new("b", "B"), Comment::new("c", "C")],
                pagination: None,
            },
            &mut s,
        );
        assert_eq!(ids(&s.comments), ["a", "b", "c"]);
    }

    #[test]
    fn replies_page_appends_to_parent_only() {
        let mut s = state();
        let b_before = s.comments[1].clone();
        reduce(&Outcome::RepliesPage { comment_id: "a".into(), replies: vec![reply("a3")] }, &mut s);
        assert_eq!(ids(&s.comments[0].replies), ["a1", "a2", "a3"]);
        assert_eq!(s.comments[1], b_before);
    }

    #[test]
    fn added_comment_goes_first_and_counts() {
        let mut s = state();
        reduce(&Outcome::CommentAdded(Comment::new("42", "new")), &mut s);
        assert_eq!(s.comments[0].id.as_str(), "42");
        assert_eq!(s.comment_count, 5);
    }

    #[test]
    fn added_reply_goes_last_and_bumps_both_counts() {
        let mut s = state();
        reduce(&Outcome::ReplyAdded { parent_id: "a".into(), reply: reply("a9") }, &mut s);
        assert_eq!(ids(&s.comments[0].replies), ["a1", "a2", "a9"]);
        assert_eq!(s.comments[0].count.replies, 4);
        assert_eq!(s.comment_count, 5);
    }

    #[test]
    fn hide_then_show_restores_count() {
        let mut s = state();
        reduce(&Outcome::CommentHidden("a1".into()), &mut s);
        assert_eq!(s.comments[0].replies[0].status, CommentStatus::Hidden);
        assert_eq!(s.comment_count, 3);

        reduce(&Outcome::CommentShown(reply("a1")), &mut s);
        assert_eq!(s.comments[0].replies[0].status, CommentStatus::Published);
        assert_eq!(s.comment_count, 4);
    }

    #[test]
    fn show_on_visible_comment_does_not_drift() {
        let mut s = state();
        reduce(&Outcome::CommentShown(Comment::new("b", "B refetched")), &mut s);
        assert_eq!(s.comment_count, 4);
        assert_eq!(s.comments[1].html.as_deref(), Some("B refetched"));
    }

    #[test]
    fn hide_of_unloaded_comment_still_counts() {
        let mut s = state();
        reduce(&Outcome::CommentHidden("elsewhere".into()), &mut s);
        assert_eq!(s.comment_count, 3);
    }

    #[test]
    fn delete_marks_only_target_and_keeps_content() {
        let mut s = state();
        reduce(&Outcome::CommentDeleted("a2".into()), &mut s);
        let a2 = &s.comments[0].replies[1];
        assert_eq!(a2.status, CommentStatus::Deleted);
        assert_eq!(a2.html.as_deref(), Some("a2"));
        assert_eq!(s.comments[0].status, CommentStatus::Published);
        assert_eq!(s.comments[0].replies[0].status, CommentStatus::Published);
        assert_eq!(s.comments[1].status, CommentStatus::Published);
        assert_eq!(s.comment_count, 3);
    }

    #[test]
    fn delete_top_level_leaves_replies_alone() {
        let mut s = state();
        reduce(&Outcome::CommentDeleted("a".into()), &mut s);
        assert_eq!(s.comments[0].status, CommentStatus::Deleted);
        assert_eq!(ids(&s.comments[0].replies), ["a1", "a2"]);
        assert!(s.comments[0].replies.iter().all(|r| r.status == CommentStatus::Published));
        assert_eq!(s.comments[1].status, CommentStatus::Published);
        assert_eq!(s.comment_count, 3);
    }

    #[test]
    fn hide_top_level_counts_once() {
        let mut s = state();
        reduce(&Outcome::CommentHidden("b".into()), &mut s);
        assert_eq!(s.comments[1].status, CommentStatus::Hidden);
        assert_eq!(s.comment_count, 3);

        // Already hidden: no further change
        reduce(&Outcome::CommentHidden("b".into()), &mut s);
        assert_eq!(s.comment_count, 3);
    }

    #[test]
    fn like_then_unlike_is_a_round_trip() {
        let mut s = state();
        let before = s.clone();
        reduce(&Outcome::LikeChanged { comment_id: "a".into(), liked: true }, &mut s);
        assert!(s.comments[0].liked);
        assert_eq!(s.comments[0].count.likes, 3);
        reduce(&Outcome::LikeChanged { comment_id: "a".into(), liked: false }, &mut s);
        assert_eq!(s, before);
    }

    #[test]
    fn repeated_like_counts_once() {
        let mut s = state();
        reduce(&Outcome::LikeChanged { comment_id: "a2".into(), liked: true }, &mut s);
        reduce(&Outcome::LikeChanged { comment_id: "a2".into(), liked: true }, &mut s);
        assert_eq!(s.comments[0].replies[1].count.likes, 1);
    }

    #[test]
    fn edit_reply_replaces_inside_parent() {
        let mut s = state();
        let mut edited = reply("a1");
        edited.html = Some("edited".into());
        reduce(&Outcome::CommentEdited { comment: edited, parent_id: Some("a".into()) }, &mut s);
        assert_eq!(s.comments[0].replies[0].html.as_deref(), Some("edited"));
        assert_eq!(s.comment_count, 4);
    }

    #[test]
    fn edit_top_level_replaces_comment() {
        let mut s = state();
        reduce(
            &Outcome::CommentEdited { comment: Comment::new("b", "B2"), parent_id: None },
            &mut s,
        );
        assert_eq!(s.comments[1].html.as_deref(), Some("B2"));
    }
}

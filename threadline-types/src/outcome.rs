use serde::{Deserialize, Serialize};

use crate::{ActionKind, Comment, CommentId, Member, Pagination};

/// What the server confirmed for a deferred action.
///
/// Outcomes are deltas: they are applied by [`crate::reduce::reduce_outcome`]
/// against whatever the state is when they arrive, not against the snapshot
/// the request was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    CommentsPage { comments: Vec<Comment>, pagination: Option<Pagination> },
    RepliesPage { comment_id: CommentId, replies: Vec<Comment> },
    CommentAdded(Comment),
    ReplyAdded { parent_id: CommentId, reply: Comment },
    CommentHidden(CommentId),
    /// Canonical member-view record refetched after unhiding.
    CommentShown(Comment),
    LikeChanged { comment_id: CommentId, liked: bool },
    CommentReported(CommentId),
    CommentDeleted(CommentId),
    CommentEdited { comment: Comment, parent_id: Option<CommentId> },
    MemberUpdated(Member),
    MemberUpdateFailed(String),
}

impl Outcome {
    /// The action that produces this outcome.
    pub fn kind(&self) -> ActionKind {
        match self {
            Outcome::CommentsPage { .. } => ActionKind::LoadMoreComments,
            Outcome::RepliesPage { .. } => ActionKind::LoadMoreReplies,
            Outcome::CommentAdded(_) => ActionKind::AddComment,
            Outcome::ReplyAdded { .. } => ActionKind::AddReply,
            Outcome::CommentHidden(_) => ActionKind::HideComment,
            Outcome::CommentShown(_) => ActionKind::ShowComment,
            Outcome::LikeChanged { liked: true, .. } => ActionKind::LikeComment,
            Outcome::LikeChanged { liked: false, .. } => ActionKind::UnlikeComment,
            Outcome::CommentReported(_) => ActionKind::ReportComment,
            Outcome::CommentDeleted(_) => ActionKind::DeleteComment,
            Outcome::CommentEdited { .. } => ActionKind::EditComment,
            Outcome::MemberUpdated(_) | Outcome::MemberUpdateFailed(_) => ActionKind::UpdateMember,
        }
    }
}

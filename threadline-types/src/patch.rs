use serde::Serialize;

use crate::reduce;
use crate::{Comment, CommentsState, ImmediateAction, Member, Outcome, Pagination, Popup};

/// Partial state. Absent fields are left untouched when merged.
///
/// `popup` is doubly optional: `Some(None)` closes the popup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<Option<Popup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secundary_form_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatePatch {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Wire names of the fields this patch sets.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.comments.is_some() {
            fields.push("comments");
        }
        if self.pagination.is_some() {
            fields.push("pagination");
        }
        if self.comment_count.is_some() {
            fields.push("commentCount");
        }
        if self.member.is_some() {
            fields.push("member");
        }
        if self.popup.is_some() {
            fields.push("popup");
        }
        if self.secundary_form_count.is_some() {
            fields.push("secundaryFormCount");
        }
        if self.success.is_some() {
            fields.push("success");
        }
        if self.error.is_some() {
            fields.push("error");
        }
        fields
    }

    /// Merge into `state`, replacing only the fields present in the patch.
    pub fn apply(self, state: &mut CommentsState) {
        if let Some(comments) = self.comments {
            state.comments = comments;
        }
        if let Some(pagination) = self.pagination {
            state.pagination = Some(pagination);
        }
        if let Some(count) = self.comment_count {
            state.comment_count = count;
        }
        if let Some(member) = self.member {
            state.member = Some(member);
        }
        if let Some(popup) = self.popup {
            state.popup = popup;
        }
        if let Some(count) = self.secundary_form_count {
            state.secundary_form_count = count;
        }
        if let Some(success) = self.success {
            state.success = Some(success);
        }
        if let Some(error) = self.error {
            state.error = Some(error);
        }
    }

    /// Project an outcome onto `snapshot` and keep only the fields the
    /// corresponding handler defines.
    pub fn from_outcome(outcome: &Outcome, snapshot: &CommentsState) -> Self {
        let mut next = snapshot.clone();
        reduce::reduce_outcome(outcome, &mut next);

        match outcome {
            Outcome::CommentsPage { .. } => Self {
                comments: Some(next.comments),
                pagination: next.pagination,
                ..Self::default()
            },
            Outcome::RepliesPage { .. }
            | Outcome::LikeChanged { .. }
            | Outcome::CommentEdited { .. } => Self {
                comments: Some(next.comments),
                ..Self::default()
            },
            Outcome::CommentAdded(_)
            | Outcome::ReplyAdded { .. }
            | Outcome::CommentHidden(_)
            | Outcome::CommentShown(_)
            | Outcome::CommentDeleted(_) => Self {
                comments: Some(next.comments),
                comment_count: Some(next.comment_count),
                ..Self::default()
            },
            Outcome::CommentReported(_) => Self::default(),
            Outcome::MemberUpdated(_) => Self {
                member: next.member,
                success: Some(true),
                ..Self::default()
            },
            Outcome::MemberUpdateFailed(error) => Self {
                success: Some(false),
                error: Some(error.clone()),
                ..Self::default()
            },
        }
    }

    /// Patch for an immediate action, computed from the state it is applied to.
    pub fn from_immediate(action: &ImmediateAction, state: &CommentsState) -> Self {
        let mut next = state.clone();
        reduce::reduce_immediate(action, &mut next);

        match action {
            ImmediateAction::OpenPopup(_) | ImmediateAction::ClosePopup => Self {
                popup: Some(next.popup),
                ..Self::default()
            },
            ImmediateAction::IncreaseSecundaryFormCount
            | ImmediateAction::DecreaseSecundaryFormCount => Self {
                secundary_form_count: Some(next.secundary_form_count),
                ..Self::default()
            },
        }
    }
}

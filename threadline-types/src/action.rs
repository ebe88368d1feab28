//! Action types for the dispatch system.
//!
//! Actions are the user intents forwarded by the presentation layer. They come
//! in two registries: deferred actions need at least one remote round-trip,
//! immediate actions are computed from the current state alone.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CommentDraft, CommentEdit, CommentId, MemberUpdate, Popup};

// ============================================================================
// Action names
// ============================================================================

/// Closed set of action names understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    LoadMoreComments,
    LoadMoreReplies,
    AddComment,
    AddReply,
    HideComment,
    ShowComment,
    LikeComment,
    UnlikeComment,
    ReportComment,
    DeleteComment,
    EditComment,
    UpdateMember,
    OpenPopup,
    ClosePopup,
    IncreaseSecundaryFormCount,
    DecreaseSecundaryFormCount,
}

impl ActionKind {
    pub const ALL: [ActionKind; 16] = [
        ActionKind::LoadMoreComments,
        ActionKind::LoadMoreReplies,
        ActionKind::AddComment,
        ActionKind::AddReply,
        ActionKind::HideComment,
        ActionKind::ShowComment,
        ActionKind::LikeComment,
        ActionKind::UnlikeComment,
        ActionKind::ReportComment,
        ActionKind::DeleteComment,
        ActionKind::EditComment,
        ActionKind::UpdateMember,
        ActionKind::OpenPopup,
        ActionKind::ClosePopup,
        ActionKind::IncreaseSecundaryFormCount,
        ActionKind::DecreaseSecundaryFormCount,
    ];

    /// Wire name used by the presentation layer.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::LoadMoreComments => "loadMoreComments",
            ActionKind::LoadMoreReplies => "loadMoreReplies",
            ActionKind::AddComment => "addComment",
            ActionKind::AddReply => "addReply",
            ActionKind::HideComment => "hideComment",
            ActionKind::ShowComment => "showComment",
            ActionKind::LikeComment => "likeComment",
            ActionKind::UnlikeComment => "unlikeComment",
            ActionKind::ReportComment => "reportComment",
            ActionKind::DeleteComment => "deleteComment",
            ActionKind::EditComment => "editComment",
            ActionKind::UpdateMember => "updateMember",
            ActionKind::OpenPopup => "openPopup",
            ActionKind::ClosePopup => "closePopup",
            ActionKind::IncreaseSecundaryFormCount => "increaseSecundaryFormCount",
            ActionKind::DecreaseSecundaryFormCount => "decreaseSecundaryFormCount",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Immediate actions must be applied against the latest state, never a
    /// snapshot taken at dispatch time.
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            ActionKind::OpenPopup
                | ActionKind::ClosePopup
                | ActionKind::IncreaseSecundaryFormCount
                | ActionKind::DecreaseSecundaryFormCount
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry membership check for string-keyed callers. Unknown names are not
/// immediate.
pub fn is_immediate_action(name: &str) -> bool {
    ActionKind::parse(name).is_some_and(|kind| kind.is_immediate())
}

// ============================================================================
// Typed actions
// ============================================================================

/// Actions that suspend on the remote client before producing a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeferredAction {
    LoadMoreComments,
    /// `limit: None` uses the configured replies page size.
    LoadMoreReplies { comment_id: CommentId, limit: Option<u32> },
    AddComment(CommentDraft),
    AddReply { reply: CommentDraft, parent_id: CommentId },
    HideComment(CommentId),
    ShowComment(CommentId),
    LikeComment(CommentId),
    UnlikeComment(CommentId),
    ReportComment(CommentId),
    DeleteComment(CommentId),
    /// `parent_id` is set when the edited comment is a reply.
    EditComment { comment: CommentEdit, parent_id: Option<CommentId> },
    UpdateMember(MemberUpdate),
}

impl DeferredAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::LoadMoreComments => ActionKind::LoadMoreComments,
            Self::LoadMoreReplies { .. } => ActionKind::LoadMoreReplies,
            Self::AddComment(_) => ActionKind::AddComment,
            Self::AddReply { .. } => ActionKind::AddReply,
            Self::HideComment(_) => ActionKind::HideComment,
            Self::ShowComment(_) => ActionKind::ShowComment,
            Self::LikeComment(_) => ActionKind::LikeComment,
            Self::UnlikeComment(_) => ActionKind::UnlikeComment,
            Self::ReportComment(_) => ActionKind::ReportComment,
            Self::DeleteComment(_) => ActionKind::DeleteComment,
            Self::EditComment { .. } => ActionKind::EditComment,
            Self::UpdateMember(_) => ActionKind::UpdateMember,
        }
    }

    /// The comment this action targets, if any.
    pub fn target(&self) -> Option<&CommentId> {
        match self {
            Self::LoadMoreReplies { comment_id: id, .. }
            | Self::AddReply { parent_id: id, .. }
            | Self::HideComment(id)
            | Self::ShowComment(id)
            | Self::LikeComment(id)
            | Self::UnlikeComment(id)
            | Self::ReportComment(id)
            | Self::DeleteComment(id) => Some(id),
            Self::EditComment { comment, .. } => Some(&comment.id),
            Self::LoadMoreComments | Self::AddComment(_) | Self::UpdateMember(_) => None,
        }
    }
}

/// Actions computed synchronously from the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImmediateAction {
    OpenPopup(Popup),
    ClosePopup,
    IncreaseSecundaryFormCount,
    DecreaseSecundaryFormCount,
}

impl ImmediateAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::OpenPopup(_) => ActionKind::OpenPopup,
            Self::ClosePopup => ActionKind::ClosePopup,
            Self::IncreaseSecundaryFormCount => ActionKind::IncreaseSecundaryFormCount,
            Self::DecreaseSecundaryFormCount => ActionKind::DecreaseSecundaryFormCount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Deferred(DeferredAction),
    Immediate(ImmediateAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Deferred(a) => a.kind(),
            Action::Immediate(a) => a.kind(),
        }
    }

    pub fn is_immediate(&self) -> bool {
        matches!(self, Action::Immediate(_))
    }

    /// Decode a string-keyed action and its opaque payload.
    ///
    /// Unknown names decode to `Ok(None)`. A known name with a payload of the
    /// wrong shape is an error.
    pub fn from_named(name: &str, data: Value) -> Result<Option<Action>, serde_json::Error> {
        let Some(kind) = ActionKind::parse(name) else {
            return Ok(None);
        };
        let action = match kind {
            ActionKind::LoadMoreComments => Action::Deferred(DeferredAction::LoadMoreComments),
            ActionKind::LoadMoreReplies => {
                let p: RepliesPayload = serde_json::from_value(data)?;
                Action::Deferred(DeferredAction::LoadMoreReplies {
                    comment_id: p.comment.id,
                    limit: p.limit,
                })
            }
            ActionKind::AddComment => {
                Action::Deferred(DeferredAction::AddComment(serde_json::from_value(data)?))
            }
            ActionKind::AddReply => {
                let p: ReplyPayload = serde_json::from_value(data)?;
                Action::Deferred(DeferredAction::AddReply { reply: p.reply, parent_id: p.parent.id })
            }
            ActionKind::HideComment => Action::Deferred(DeferredAction::HideComment(comment_id(data)?)),
            ActionKind::ShowComment => Action::Deferred(DeferredAction::ShowComment(comment_id(data)?)),
            ActionKind::LikeComment => Action::Deferred(DeferredAction::LikeComment(comment_id(data)?)),
            ActionKind::UnlikeComment => {
                Action::Deferred(DeferredAction::UnlikeComment(comment_id(data)?))
            }
            ActionKind::ReportComment => {
                Action::Deferred(DeferredAction::ReportComment(comment_id(data)?))
            }
            ActionKind::DeleteComment => {
                Action::Deferred(DeferredAction::DeleteComment(comment_id(data)?))
            }
            ActionKind::EditComment => {
                let p: EditPayload = serde_json::from_value(data)?;
                Action::Deferred(DeferredAction::EditComment {
                    comment: p.comment,
                    parent_id: p.parent.map(|parent| parent.id),
                })
            }
            ActionKind::UpdateMember => {
                Action::Deferred(DeferredAction::UpdateMember(serde_json::from_value(data)?))
            }
            ActionKind::OpenPopup => {
                Action::Immediate(ImmediateAction::OpenPopup(serde_json::from_value(data)?))
            }
            ActionKind::ClosePopup => Action::Immediate(ImmediateAction::ClosePopup),
            ActionKind::IncreaseSecundaryFormCount => {
                Action::Immediate(ImmediateAction::IncreaseSecundaryFormCount)
            }
            ActionKind::DecreaseSecundaryFormCount => {
                Action::Immediate(ImmediateAction::DecreaseSecundaryFormCount)
            }
        };
        Ok(Some(action))
    }
}

impl From<DeferredAction> for Action {
    fn from(a: DeferredAction) -> Self {
        Action::Deferred(a)
    }
}

impl From<ImmediateAction> for Action {
    fn from(a: ImmediateAction) -> Self {
        Action::Immediate(a)
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

// Payloads carry whole comment objects; only the id is needed.
#[derive(Deserialize)]
struct CommentRef {
    id: CommentId,
}

#[derive(Deserialize)]
struct RepliesPayload {
    comment: CommentRef,
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Deserialize)]
struct ReplyPayload {
    reply: CommentDraft,
    parent: CommentRef,
}

#[derive(Deserialize)]
struct EditPayload {
    comment: CommentEdit,
    #[serde(default)]
    parent: Option<CommentRef>,
}

fn comment_id(data: Value) -> Result<CommentId, serde_json::Error> {
    serde_json::from_value::<CommentRef>(data).map(|c| c.id)
}

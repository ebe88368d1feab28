use serde::{Deserialize, Serialize};

use crate::CommentId;

/// Moderation status of a comment. Deleting and hiding are status changes;
/// a comment row is never physically removed from the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Published,
    Hidden,
    Deleted,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Published => "published",
            CommentStatus::Hidden => "hidden",
            CommentStatus::Deleted => "deleted",
        }
    }

    /// Only published comments count towards `comment_count`.
    pub fn is_visible(&self) -> bool {
        matches!(self, CommentStatus::Published)
    }
}

/// Per-comment counters as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentCount {
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub replies: i64,
}

/// Author reference embedded in a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_image: Option<String>,
}

/// A comment or a reply. Replies share the same shape; only top-level
/// comments carry a non-empty `replies` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    #[serde(default)]
    pub status: CommentStatus,
    #[serde(default)]
    pub member: Option<MemberRef>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub count: CommentCount,
    /// Loaded replies, oldest first. May be a prefix of all replies.
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub edited_at: Option<String>,
}

impl Comment {
    pub fn new(id: impl Into<CommentId>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            status: CommentStatus::Published,
            member: None,
            html: Some(html.into()),
            liked: false,
            count: CommentCount::default(),
            replies: Vec::new(),
            created_at: None,
            edited_at: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.status.is_visible()
    }

    /// Pagination cursor for the next replies page.
    pub fn last_reply_id(&self) -> Option<&CommentId> {
        self.replies.last().map(|r| &r.id)
    }

    pub fn is_authored_by(&self, uuid: &str) -> bool {
        self.member.as_ref().is_some_and(|m| m.uuid == uuid)
    }
}

/// A locally built comment that has not been confirmed by the server yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub post_id: String,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    pub html: String,
    #[serde(default)]
    pub status: CommentStatus,
}

impl CommentDraft {
    pub fn new(post_id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            parent_id: None,
            html: html.into(),
            status: CommentStatus::Published,
        }
    }
}

/// Partial update sent to the edit endpoint. Absent fields are left alone
/// by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEdit {
    pub id: CommentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CommentStatus>,
}

impl CommentEdit {
    pub fn html(id: CommentId, html: impl Into<String>) -> Self {
        Self { id, html: Some(html.into()), status: None }
    }

    /// Soft delete: only the id and the new status go over the wire.
    pub fn delete(id: CommentId) -> Self {
        Self { id, html: None, status: Some(CommentStatus::Deleted) }
    }
}

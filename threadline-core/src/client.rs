//! Remote client contract.
//!
//! The comments backend is an external collaborator. Transports implement
//! these traits; handlers in [`crate::dispatch`] only ever see them as trait
//! objects bundled in [`Api`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use threadline_types::{
    Comment, CommentDraft, CommentEdit, CommentId, Member, MemberPatch, Pagination,
};

// ============================================================================
// Requests and wire envelopes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseRequest {
    pub page: u32,
    pub post_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepliesRequest {
    pub comment_id: CommentId,
    /// Cursor: last reply already loaded. None fetches from the start.
    pub after_reply_id: Option<CommentId>,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub pagination: Pagination,
}

/// `{comments: [...], meta?: {pagination}}` as returned by every comments endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentsEnvelope {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl CommentsEnvelope {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments, meta: None }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.meta = Some(Meta { pagination });
        self
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.meta.map(|m| m.pagination)
    }

    /// The single record returned by add/edit/read.
    pub fn into_first(self, endpoint: &'static str) -> Result<Comment, ClientError> {
        self.comments
            .into_iter()
            .next()
            .ok_or(ClientError::EmptyResponse(endpoint))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error type for remote calls.
#[derive(Debug)]
pub enum ClientError {
    /// The server answered and refused the request.
    Rejected { endpoint: &'static str, message: String },
    /// The request never got an answer.
    Transport(String),
    Decode(serde_json::Error),
    /// A record was required but `comments` was empty.
    EmptyResponse(&'static str),
    /// Admin-gated action with no admin client configured.
    AdminUnavailable,
    /// `member.update` returned nothing.
    MemberUpdateFailed,
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected { endpoint, message } => write!(f, "{} rejected: {}", endpoint, message),
            Self::Transport(e) => write!(f, "transport error: {}", e),
            Self::Decode(e) => write!(f, "JSON error: {}", e),
            Self::EmptyResponse(endpoint) => write!(f, "{} returned no comments", endpoint),
            Self::AdminUnavailable => write!(f, "admin client not available"),
            Self::MemberUpdateFailed => write!(f, "Failed to update member"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Member-scoped comment endpoints.
pub trait CommentsApi: Send + Sync {
    fn browse(&self, request: &BrowseRequest) -> Result<CommentsEnvelope, ClientError>;
    fn replies(&self, request: &RepliesRequest) -> Result<CommentsEnvelope, ClientError>;
    fn add(&self, comment: &CommentDraft) -> Result<CommentsEnvelope, ClientError>;
    fn edit(&self, comment: &CommentEdit) -> Result<CommentsEnvelope, ClientError>;
    /// Full record as seen by the current member.
    fn read(&self, id: &CommentId) -> Result<CommentsEnvelope, ClientError>;
    fn like(&self, id: &CommentId) -> Result<(), ClientError>;
    fn unlike(&self, id: &CommentId) -> Result<(), ClientError>;
    fn report(&self, id: &CommentId) -> Result<(), ClientError>;
}

pub trait MemberApi: Send + Sync {
    /// `Ok(None)` means the server accepted the call but returned no member.
    fn update(&self, patch: &MemberPatch) -> Result<Option<Member>, ClientError>;
}

/// Privileged moderation endpoints.
pub trait AdminApi: Send + Sync {
    fn hide_comment(&self, id: &CommentId) -> Result<(), ClientError>;
    fn show_comment(&self, id: &CommentId) -> Result<(), ClientError>;
}

/// The collaborator clients handed to every deferred handler.
#[derive(Clone)]
pub struct Api {
    pub comments: Arc<dyn CommentsApi>,
    pub member: Arc<dyn MemberApi>,
    pub admin: Option<Arc<dyn AdminApi>>,
}

impl Api {
    pub fn new(comments: Arc<dyn CommentsApi>, member: Arc<dyn MemberApi>) -> Self {
        Self { comments, member, admin: None }
    }

    pub fn with_admin(mut self, admin: Arc<dyn AdminApi>) -> Self {
        self.admin = Some(admin);
        self
    }

    pub fn has_admin(&self) -> bool {
        self.admin.is_some()
    }

    pub fn admin(&self) -> Result<&dyn AdminApi, ClientError> {
        self.admin.as_deref().ok_or(ClientError::AdminUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_browse_response() {
        let env: CommentsEnvelope = serde_json::from_str(
            r#"{"comments":[{"id":"c1"},{"id":"c2"}],"meta":{"pagination":{"page":2,"pages":4}}}"#,
        )
        .unwrap();
        assert_eq!(env.comments.len(), 2);
        assert_eq!(env.pagination().map(|p| p.page), Some(2));
    }

    #[test]
    fn empty_envelope_is_an_error_for_single_record_endpoints() {
        let err = CommentsEnvelope::default().into_first("comments.add").unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse("comments.add")));
        assert_eq!(err.to_string(), "comments.add returned no comments");
    }

    #[test]
    fn replies_request_serializes_cursor() {
        let req = RepliesRequest { comment_id: "c1".into(), after_reply_id: None, limit: 5 };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["after_reply_id"], serde_json::Value::Null);
        assert_eq!(json["limit"], 5);
    }
}

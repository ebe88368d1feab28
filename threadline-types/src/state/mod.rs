pub mod comment;
pub mod member;
pub mod permissions;
pub mod popup;
pub mod tree;

pub use comment::{Comment, CommentCount, CommentDraft, CommentEdit, CommentStatus, MemberRef};
pub use member::{Member, MemberPatch, MemberUpdate};
pub use permissions::ContextMenu;
pub use popup::Popup;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::CommentId;

/// Replies page size used when the caller does not ask for one.
pub const DEFAULT_REPLIES_LIMIT: u32 = 100;

/// Cursor metadata for the top-level comments list, as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
}

impl Pagination {
    /// Page to request next: 1 before anything was loaded, else current + 1.
    pub fn next_page(current: Option<&Pagination>) -> u32 {
        match current {
            Some(p) if p.page > 0 => p.page + 1,
            _ => 1,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some() || self.page < self.pages
    }
}

/// The single state tree of the widget.
///
/// `comments` is stored newest first; the presentation layer shows it reversed.
/// `comment_count` counts published nodes, top-level and nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentsState {
    pub post_id: String,
    pub comments: Vec<Comment>,
    pub pagination: Option<Pagination>,
    pub comment_count: i64,
    pub member: Option<Member>,
    /// Whether an admin session is attached (admin client available).
    #[serde(default)]
    pub admin: bool,
    pub popup: Option<Popup>,
    pub secundary_form_count: i64,
    /// Result of the last profile update, if any.
    pub success: Option<bool>,
    pub error: Option<String>,
}

impl CommentsState {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self { post_id: post_id.into(), ..Self::default() }
    }

    pub fn find(&self, id: &CommentId) -> Option<&Comment> {
        tree::find_comment(&self.comments, id)
    }

    pub fn context_menu(&self, comment: &Comment) -> Option<ContextMenu> {
        ContextMenu::for_comment(comment, self.member.as_ref(), self.admin)
    }
}

/// Which in-flight pagination request a result belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationKey {
    CommentsPage,
    Replies(CommentId),
}

/// Generation counters for pagination requests.
///
/// Every request for a list gets the next generation. A result is superseded
/// only once a newer result for the same list has been merged; a newer
/// request that failed supersedes nothing.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    issued: HashMap<GenerationKey, u64>,
    applied: HashMap<GenerationKey, u64>,
}

impl RequestGeneration {
    pub fn next(&mut self, key: &GenerationKey) -> u64 {
        let slot = self.issued.entry(key.clone()).or_default();
        *slot = slot.wrapping_add(1);
        *slot
    }

    /// Record that the result of `generation` was merged.
    pub fn mark_applied(&mut self, key: &GenerationKey, generation: u64) {
        let slot = self.applied.entry(key.clone()).or_default();
        *slot = (*slot).max(generation);
    }

    pub fn is_superseded(&self, key: &GenerationKey, generation: u64) -> bool {
        self.applied.get(key).is_some_and(|applied| *applied > generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_page_starts_at_one() {
        assert_eq!(Pagination::next_page(None), 1);
        let p = Pagination { page: 3, ..Pagination::default() };
        assert_eq!(Pagination::next_page(Some(&p)), 4);
        let zero = Pagination::default();
        assert_eq!(Pagination::next_page(Some(&zero)), 1);
    }

    #[test]
    fn only_an_applied_newer_result_supersedes() {
        let mut gen = RequestGeneration::default();
        let first = gen.next(&GenerationKey::CommentsPage);
        let second = gen.next(&GenerationKey::CommentsPage);
        assert_eq!((first, second), (1, 2));

        // Issuing a newer request alone does not make the older one stale
        assert!(!gen.is_superseded(&GenerationKey::CommentsPage, first));

        gen.mark_applied(&GenerationKey::CommentsPage, second);
        assert!(gen.is_superseded(&GenerationKey::CommentsPage, first));
        assert!(!gen.is_superseded(&GenerationKey::CommentsPage, second));

        // Marking an older generation later never rolls back
        gen.mark_applied(&GenerationKey::CommentsPage, first);
        assert!(gen.is_superseded(&GenerationKey::CommentsPage, first));
    }

    #[test]
    fn generations_are_per_list() {
        let mut gen = RequestGeneration::default();
        let page = gen.next(&GenerationKey::CommentsPage);
        let replies = GenerationKey::Replies(CommentId::new("a"));
        let r = gen.next(&replies);
        assert_eq!(r, 1);
        let newer = gen.next(&replies);
        gen.mark_applied(&replies, newer);
        assert!(gen.is_superseded(&replies, r));
        assert!(!gen.is_superseded(&GenerationKey::CommentsPage, page));
    }

    #[test]
    fn pagination_decodes_server_meta() {
        let p: Pagination = serde_json::from_str(
            r#"{"page":1,"limit":20,"pages":3,"total":55,"next":2,"prev":null}"#,
        )
        .unwrap();
        assert_eq!(p.next, Some(2));
        assert!(p.has_more());
    }
}

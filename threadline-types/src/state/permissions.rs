//! Which moderation/authoring menu a viewer gets for a comment.

use super::comment::Comment;
use super::member::Member;
use crate::ActionKind;

/// Context menu variants offered on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenu {
    /// Edit and delete, for the comment's author.
    Author,
    /// Hide or show, for admins.
    Admin,
    /// Report, for everyone else.
    Reader,
}

impl ContextMenu {
    /// Published comments: the author gets the author menu even when they are
    /// also an admin. Hidden or deleted comments only get a menu for admins.
    pub fn for_comment(comment: &Comment, viewer: Option<&Member>, is_admin: bool) -> Option<Self> {
        let is_author = viewer.is_some_and(|m| comment.is_authored_by(&m.uuid));

        if comment.is_visible() {
            if is_author {
                Some(ContextMenu::Author)
            } else if is_admin {
                Some(ContextMenu::Admin)
            } else {
                Some(ContextMenu::Reader)
            }
        } else if is_admin {
            Some(ContextMenu::Admin)
        } else {
            None
        }
    }

    /// Actions the menu can dispatch for this comment.
    pub fn actions(&self, comment: &Comment) -> &'static [ActionKind] {
        match self {
            ContextMenu::Author => &[ActionKind::EditComment, ActionKind::DeleteComment],
            ContextMenu::Admin if comment.status == crate::CommentStatus::Hidden => {
                &[ActionKind::ShowComment]
            }
            ContextMenu::Admin => &[ActionKind::HideComment],
            ContextMenu::Reader => &[ActionKind::ReportComment],
        }
    }
}

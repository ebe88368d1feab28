//! Admin-gated handlers. No local rollback: if the second call of
//! `show_comment` fails, the comment stays unhidden server-side.

use threadline_types::{CommentId, Outcome};

use crate::client::{Api, ClientError};

pub(super) fn hide_comment(id: &CommentId, api: &Api) -> Result<Outcome, ClientError> {
    api.admin()?.hide_comment(id)?;
    Ok(Outcome::CommentHidden(id.clone()))
}

/// Unhide, then refetch as the member: the admin view of content and
/// relations differs from what the member should see.
pub(super) fn show_comment(id: &CommentId, api: &Api) -> Result<Outcome, ClientError> {
    api.admin()?.show_comment(id)?;
    let comment = api.comments.read(id)?.into_first("comments.read")?;
    Ok(Outcome::CommentShown(comment))
}

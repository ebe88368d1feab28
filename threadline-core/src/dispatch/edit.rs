use threadline_types::{CommentEdit, CommentId, Outcome};

use crate::client::{Api, ClientError};

/// Soft delete through the edit endpoint. The server's echo is not needed.
pub(super) fn delete_comment(id: &CommentId, api: &Api) -> Result<Outcome, ClientError> {
    api.comments.edit(&CommentEdit::delete(id.clone()))?;
    Ok(Outcome::CommentDeleted(id.clone()))
}

pub(super) fn edit_comment(
    edit: &CommentEdit,
    parent_id: Option<&CommentId>,
    api: &Api,
) -> Result<Outcome, ClientError> {
    let comment = api.comments.edit(edit)?.into_first("comments.edit")?;
    Ok(Outcome::CommentEdited { comment, parent_id: parent_id.cloned() })
}

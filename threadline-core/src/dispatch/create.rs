use threadline_types::{CommentDraft, CommentId, Outcome};

use crate::client::{Api, ClientError};

/// The draft is never inserted locally; only the confirmed record is.
pub(super) fn add_comment(draft: &CommentDraft, api: &Api) -> Result<Outcome, ClientError> {
    let comment = api.comments.add(draft)?.into_first("comments.add")?;
    Ok(Outcome::CommentAdded(comment))
}

pub(super) fn add_reply(
    draft: &CommentDraft,
    parent_id: &CommentId,
    api: &Api,
) -> Result<Outcome, ClientError> {
    let reply = CommentDraft { parent_id: Some(parent_id.clone()), ..draft.clone() };
    let reply = api.comments.add(&reply)?.into_first("comments.add")?;
    Ok(Outcome::ReplyAdded { parent_id: parent_id.clone(), reply })
}

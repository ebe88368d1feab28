use threadline_types::{CommentId, Outcome};

use crate::client::{Api, ClientError};

pub(super) fn set_liked(id: &CommentId, liked: bool, api: &Api) -> Result<Outcome, ClientError> {
    if liked {
        api.comments.like(id)?;
    } else {
        api.comments.unlike(id)?;
    }
    Ok(Outcome::LikeChanged { comment_id: id.clone(), liked })
}

pub(super) fn report_comment(id: &CommentId, api: &Api) -> Result<Outcome, ClientError> {
    api.comments.report(id)?;
    Ok(Outcome::CommentReported(id.clone()))
}

use threadline_types::{CommentId, CommentsState, Outcome, Pagination, DEFAULT_REPLIES_LIMIT};

use crate::client::{Api, BrowseRequest, ClientError, RepliesRequest};

pub(super) fn load_more_comments(state: &CommentsState, api: &Api) -> Result<Outcome, ClientError> {
    let request = BrowseRequest {
        page: Pagination::next_page(state.pagination.as_ref()),
        post_id: state.post_id.clone(),
    };
    log::debug!(target: "dispatch", "browse page {} of post {}", request.page, request.post_id);

    let envelope = api.comments.browse(&request)?;
    let pagination = envelope.pagination();
    Ok(Outcome::CommentsPage { comments: envelope.comments, pagination })
}

/// Replies are fetched after the last loaded reply of the parent.
pub(super) fn load_more_replies(
    comment_id: &CommentId,
    limit: Option<u32>,
    state: &CommentsState,
    api: &Api,
) -> Result<Option<Outcome>, ClientError> {
    let Some(parent) = state.comments.iter().find(|c| &c.id == comment_id) else {
        log::warn!(target: "dispatch", "loadMoreReplies: comment {} is not loaded", comment_id);
        return Ok(None);
    };

    let request = RepliesRequest {
        comment_id: comment_id.clone(),
        after_reply_id: parent.last_reply_id().cloned(),
        limit: limit.unwrap_or(DEFAULT_REPLIES_LIMIT),
    };
    let envelope = api.comments.replies(&request)?;
    Ok(Some(Outcome::RepliesPage { comment_id: comment_id.clone(), replies: envelope.comments }))
}

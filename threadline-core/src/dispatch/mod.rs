mod create;
mod edit;
mod interaction;
mod member;
mod moderation;
mod pagination;

use serde_json::Value;

use threadline_types::{
    Action, CommentsState, DeferredAction, ImmediateAction, Outcome, StatePatch,
};

use crate::client::{Api, ClientError};

/// Error type for string-keyed dispatch.
#[derive(Debug)]
pub enum DispatchError {
    /// Known action name, payload of the wrong shape.
    Payload { action: String, source: serde_json::Error },
    Client(ClientError),
}

impl From<ClientError> for DispatchError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payload { action, source } => write!(f, "invalid payload for {}: {}", action, source),
            Self::Client(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Run the remote part of a deferred action.
///
/// `state` is only read to build requests. Remote calls inside one action are
/// strictly sequential. Returns `Ok(None)` when the action turned out to be a
/// no-op (e.g. a profile update that changes nothing).
pub fn perform(
    action: &DeferredAction,
    state: &CommentsState,
    api: &Api,
) -> Result<Option<Outcome>, ClientError> {
    let outcome = match action {
        DeferredAction::LoadMoreComments => pagination::load_more_comments(state, api)?,
        DeferredAction::LoadMoreReplies { comment_id, limit } => {
            return pagination::load_more_replies(comment_id, *limit, state, api);
        }
        DeferredAction::AddComment(draft) => create::add_comment(draft, api)?,
        DeferredAction::AddReply { reply, parent_id } => create::add_reply(reply, parent_id, api)?,
        DeferredAction::HideComment(id) => moderation::hide_comment(id, api)?,
        DeferredAction::ShowComment(id) => moderation::show_comment(id, api)?,
        DeferredAction::LikeComment(id) => interaction::set_liked(id, true, api)?,
        DeferredAction::UnlikeComment(id) => interaction::set_liked(id, false, api)?,
        DeferredAction::ReportComment(id) => interaction::report_comment(id, api)?,
        DeferredAction::DeleteComment(id) => edit::delete_comment(id, api)?,
        DeferredAction::EditComment { comment, parent_id } => {
            edit::edit_comment(comment, parent_id.as_ref(), api)?
        }
        DeferredAction::UpdateMember(update) => return Ok(member::update_member(update, state, api)),
    };
    Ok(Some(outcome))
}

/// Dispatch a deferred action against a state snapshot and return the patch
/// its handler defines. Unchanged state yields an empty patch.
///
/// The patch is computed against `state` as given. Callers that may have
/// other actions in flight should apply the outcome to their latest state
/// instead (see [`crate::store::Store`]).
pub fn dispatch_deferred(
    action: &DeferredAction,
    state: &CommentsState,
    api: &Api,
) -> Result<StatePatch, ClientError> {
    log::debug!(target: "dispatch", "deferred {}", action.kind());
    let outcome = perform(action, state, api).map_err(|e| {
        log::warn!(target: "dispatch", "{} failed: {}", action.kind(), e);
        e
    })?;
    Ok(outcome
        .map(|o| StatePatch::from_outcome(&o, state))
        .unwrap_or_default())
}

/// Dispatch an immediate action. Must be called with the state the patch
/// will be merged into.
pub fn dispatch_immediate(action: &ImmediateAction, state: &CommentsState) -> StatePatch {
    log::debug!(target: "dispatch", "immediate {}", action.kind());
    StatePatch::from_immediate(action, state)
}

pub fn dispatch_action(action: &Action, state: &CommentsState, api: &Api) -> Result<StatePatch, ClientError> {
    match action {
        Action::Deferred(a) => dispatch_deferred(a, state, api),
        Action::Immediate(a) => Ok(dispatch_immediate(a, state)),
    }
}

/// String-keyed entry point. Unknown action names are a no-op and return an
/// empty patch.
pub fn dispatch_named(
    name: &str,
    data: Value,
    state: &CommentsState,
    api: &Api,
) -> Result<StatePatch, DispatchError> {
    let action = Action::from_named(name, data).map_err(|source| DispatchError::Payload {
        action: name.to_string(),
        source,
    })?;
    match action {
        Some(action) => Ok(dispatch_action(&action, state, api)?),
        None => {
            log::debug!(target: "dispatch", "ignoring unknown action {}", name);
            Ok(StatePatch::none())
        }
    }
}

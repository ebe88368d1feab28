//! Pure state-mutation reducers for the comments engine.
//!
//! These functions are the single source of truth for how confirmed outcomes
//! and immediate actions change [`CommentsState`]. The dispatch layer in
//! threadline-core and outcome-log replay both call into this module.
//!
//! Reducers are pure: they mutate the state they are given and nothing else.
//! They do NOT:
//! - Call the remote client
//! - Log
//! - Decide whether a result is stale

mod comments;
mod member;
mod ui;

use crate::{CommentsState, ImmediateAction, Outcome};

/// Apply a confirmed outcome to the latest state.
pub fn reduce_outcome(outcome: &Outcome, state: &mut CommentsState) {
    match outcome {
        Outcome::MemberUpdated(_) | Outcome::MemberUpdateFailed(_) => member::reduce(outcome, state),
        Outcome::CommentReported(_) => {}
        _ => comments::reduce(outcome, state),
    }
}

/// Apply an immediate action to the latest state.
pub fn reduce_immediate(action: &ImmediateAction, state: &mut CommentsState) {
    ui::reduce(action, state);
}

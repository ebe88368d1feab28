//! Dispatch abstraction for the state owner.

use crate::{Action, StatePatch};

/// Identifier handed out for a deferred action still waiting on the server.
pub type RequestId = u64;

/// What happened to a dispatched action at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// Applied immediately; the patch that was merged.
    Applied(StatePatch),
    /// Sent to the remote client; the result arrives later as feedback.
    Pending(RequestId),
    /// Unknown action name. Nothing happened.
    Ignored,
}

/// Trait for dispatching actions to the owner of the authoritative state.
///
/// Implementations are the single writer: every patch and outcome is merged
/// into the latest state through them.
pub trait Dispatcher {
    fn dispatch(&mut self, action: Action) -> Dispatched;
}

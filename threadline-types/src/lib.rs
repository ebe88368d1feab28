//! # threadline-types
//!
//! Shared type definitions for the threadline comments engine: the state tree,
//! the closed set of actions, state patches, and the pure reducers that turn
//! confirmed results into state changes.
//!
//! Nothing in this crate talks to the network. Remote calls live in
//! threadline-core, which feeds their results back through [`reduce`].

pub mod action;
mod dispatch;
mod outcome;
mod patch;
pub mod reduce;
pub mod state;

pub use action::*;
pub use dispatch::{Dispatched, Dispatcher, RequestId};
pub use outcome::Outcome;
pub use patch::StatePatch;

// Re-export all state types at crate root for convenience
pub use state::*;

use serde::{Deserialize, Serialize};

/// Server-assigned comment identifier. Stable for the lifetime of a comment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

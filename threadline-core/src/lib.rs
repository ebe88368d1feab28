//! # threadline-core
//!
//! Action dispatch and state reconciliation for an embedded comments widget.
//! Talks to the remote comments API through the traits in [`client`], and
//! merges confirmed results into a single [`CommentsState`] tree.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use threadline_core::client::Api;
//! use threadline_core::config::Config;
//! use threadline_core::store::Store;
//! use threadline_types::{CommentsState, DeferredAction};
//!
//! // 1. Build the API bundle from your transport implementations
//! let api = Api::new(comments_client, member_client).with_admin(admin_client);
//!
//! // 2. Create the single-writer store
//! let config = Config::load();
//! let mut store = Store::new(CommentsState::new(post_id), api).with_config(&config);
//!
//! // 3. Dispatch user intents; deferred ones return a request id
//! store.dispatch(DeferredAction::LoadMoreComments.into());
//!
//! // 4. Drain feedback from the event loop and re-render from store.state()
//! for event in store.drain_feedback() { /* ... */ }
//! ```
//!
//! ## Module Overview
//!
//! - [`client`]: remote client traits, wire envelopes, `ClientError`
//! - [`dispatch`]: deferred handlers, `dispatch_deferred`/`dispatch_immediate`,
//!   string-keyed `dispatch_named`
//! - [`store`]: `Store`, the single writer that owns the state
//! - [`config`]: TOML configuration (embedded defaults + user override)
//! - [`logging`]: file logger setup for host applications
//! - [`outcome_log`]: JSONL log of applied outcomes, with replay

pub mod client;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod outcome_log;
pub mod store;

pub use threadline_types::CommentsState;

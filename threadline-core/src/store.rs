//! Single-writer owner of the comments state.
//!
//! Deferred actions run on worker threads against a snapshot and report back
//! over a channel. Their outcomes are merged here, against the latest state,
//! so two actions in flight never overwrite each other's changes.

use std::collections::HashMap;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use serde_json::Value;

use threadline_types::reduce;
use threadline_types::{
    Action, ActionKind, CommentsState, DeferredAction, Dispatched, Dispatcher, GenerationKey,
    ImmediateAction, Outcome, RequestGeneration, RequestId, StatePatch, DEFAULT_REPLIES_LIMIT,
};

use crate::client::{Api, ClientError};
use crate::config::Config;
use crate::dispatch::{self, DispatchError};
use crate::outcome_log::OutcomeLog;

/// Result of a deferred action, sent from the worker thread.
#[derive(Debug)]
pub struct ActionFeedback {
    pub id: RequestId,
    pub kind: ActionKind,
    pub generation: Option<(GenerationKey, u64)>,
    pub result: Result<Option<Outcome>, ClientError>,
}

/// What the store did with a piece of feedback.
#[derive(Debug)]
pub enum StoreEvent {
    /// Outcome merged into the state.
    Applied { id: RequestId, kind: ActionKind },
    /// The server call succeeded but there was nothing to change.
    Unchanged { id: RequestId, kind: ActionKind },
    /// A newer request for the same list is still in flight. The result is
    /// kept and merged later if that request fails.
    Held { id: RequestId, kind: ActionKind },
    /// A newer result for the same list was merged instead.
    Stale { id: RequestId, kind: ActionKind },
    /// The remote call was rejected. State is untouched.
    Failed { id: RequestId, kind: ActionKind, error: ClientError },
}

impl StoreEvent {
    pub fn id(&self) -> RequestId {
        match self {
            Self::Applied { id, .. }
            | Self::Unchanged { id, .. }
            | Self::Held { id, .. }
            | Self::Stale { id, .. }
            | Self::Failed { id, .. } => *id,
        }
    }
}

struct PendingRequest {
    kind: ActionKind,
    generation: Option<(GenerationKey, u64)>,
}

/// Page result waiting on a newer request for the same list.
struct HeldResult {
    id: RequestId,
    kind: ActionKind,
    generation: u64,
    outcome: Option<Outcome>,
}

pub struct Store {
    state: CommentsState,
    api: Api,
    replies_limit: u32,
    generation: RequestGeneration,
    next_id: RequestId,
    pending: HashMap<RequestId, PendingRequest>,
    held: HashMap<GenerationKey, HeldResult>,
    feedback_tx: Sender<ActionFeedback>,
    feedback_rx: Receiver<ActionFeedback>,
    outcome_log: Option<OutcomeLog>,
}

impl Store {
    pub fn new(mut state: CommentsState, api: Api) -> Self {
        let (feedback_tx, feedback_rx) = crossbeam_channel::unbounded();
        state.admin = api.has_admin();
        Self {
            state,
            api,
            replies_limit: DEFAULT_REPLIES_LIMIT,
            generation: RequestGeneration::default(),
            next_id: 0,
            pending: HashMap::new(),
            held: HashMap::new(),
            feedback_tx,
            feedback_rx,
            outcome_log: None,
        }
    }

    /// Apply configuration: replies page size and the optional outcome log.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.replies_limit = config.replies_limit();
        if let Some(path) = config.outcome_log_path() {
            match OutcomeLog::open(path, &self.state.post_id) {
                Ok(log) => self.outcome_log = Some(log),
                Err(e) => {
                    log::warn!(target: "store", "outcome log {} disabled: {}", path.display(), e)
                }
            }
        }
        self
    }

    pub fn with_outcome_log(mut self, log: OutcomeLog) -> Self {
        self.outcome_log = Some(log);
        self
    }

    pub fn state(&self) -> &CommentsState {
        &self.state
    }

    pub fn into_state(self) -> CommentsState {
        self.state
    }

    /// Number of deferred actions still waiting on the server.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: RequestId) -> bool {
        self.pending.contains_key(&id)
    }

    /// String-keyed dispatch. Unknown names are ignored.
    pub fn dispatch_named(&mut self, name: &str, data: Value) -> Result<Dispatched, DispatchError> {
        let action = Action::from_named(name, data).map_err(|source| DispatchError::Payload {
            action: name.to_string(),
            source,
        })?;
        Ok(match action {
            Some(action) => self.dispatch(action),
            None => {
                log::debug!(target: "store", "ignoring unknown action {}", name);
                Dispatched::Ignored
            }
        })
    }

    /// Apply an immediate action to the current state.
    pub fn apply_immediate(&mut self, action: &ImmediateAction) -> StatePatch {
        let patch = dispatch::dispatch_immediate(action, &self.state);
        reduce::reduce_immediate(action, &mut self.state);
        patch
    }

    /// Start a deferred action on a worker thread.
    pub fn spawn_deferred(&mut self, action: DeferredAction) -> RequestId {
        let action = self.resolve_defaults(action);
        let kind = action.kind();
        let id = self.next_request_id();
        let generation = generation_key(&action).map(|key| {
            let gen = self.generation.next(&key);
            (key, gen)
        });
        self.pending.insert(id, PendingRequest { kind, generation: generation.clone() });
        log::debug!(target: "store", "request {} {} started", id, kind);

        let snapshot = self.state.clone();
        let api = self.api.clone();
        let tx = self.feedback_tx.clone();

        std::thread::spawn(move || {
            let result = dispatch::perform(&action, &snapshot, &api);
            let _ = tx.send(ActionFeedback { id, kind, generation, result });
        });

        id
    }

    /// Run a deferred action on the calling thread and merge its outcome.
    /// Returns the patch that was merged.
    ///
    /// A page loaded this way supersedes page results still in flight.
    pub fn dispatch_blocking(&mut self, action: DeferredAction) -> Result<StatePatch, ClientError> {
        let action = self.resolve_defaults(action);
        let id = self.next_request_id();
        let generation = generation_key(&action).map(|key| {
            let gen = self.generation.next(&key);
            (key, gen)
        });
        let outcome = dispatch::perform(&action, &self.state, &self.api)?;

        if let Some((key, gen)) = generation {
            self.generation.mark_applied(&key, gen);
            if let Some(held) = self.held.remove(&key) {
                log::debug!(target: "store", "request {} {} superseded, dropping result", held.id, held.kind);
            }
        }
        Ok(match outcome {
            Some(outcome) => {
                let patch = StatePatch::from_outcome(&outcome, &self.state);
                self.merge_outcome(id, &outcome);
                patch
            }
            None => StatePatch::none(),
        })
    }

    /// Merge every piece of feedback received so far.
    pub fn drain_feedback(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        while let Ok(feedback) = self.feedback_rx.try_recv() {
            self.apply_feedback(feedback, &mut events);
        }
        events
    }

    /// Block until one piece of feedback arrives (or `timeout` passes) and
    /// merge it. Empty on timeout.
    ///
    /// One feedback can settle more than one request: a failed page load
    /// releases the older result it was holding back.
    pub fn wait_feedback(&mut self, timeout: Duration) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        if let Ok(feedback) = self.feedback_rx.recv_timeout(timeout) {
            self.apply_feedback(feedback, &mut events);
        }
        events
    }

    fn apply_feedback(&mut self, feedback: ActionFeedback, events: &mut Vec<StoreEvent>) {
        let ActionFeedback { id, kind, generation, result } = feedback;
        self.pending.remove(&id);

        match (result, generation) {
            (Err(error), generation) => {
                log::warn!(target: "store", "request {} {} failed: {}", id, kind, error);
                events.push(StoreEvent::Failed { id, kind, error });
                if let Some((key, _)) = generation {
                    self.release_held(&key, events);
                }
            }
            (Ok(outcome), Some((key, gen))) => {
                let result = HeldResult { id, kind, generation: gen, outcome };
                self.apply_page(key, result, events);
            }
            (Ok(outcome), None) => events.push(self.merge_result(id, kind, outcome)),
        }
    }

    fn apply_page(&mut self, key: GenerationKey, result: HeldResult, events: &mut Vec<StoreEvent>) {
        let HeldResult { id, kind, generation, .. } = result;

        if self.generation.is_superseded(&key, generation) {
            log::debug!(target: "store", "request {} {} superseded, dropping result", id, kind);
            events.push(StoreEvent::Stale { id, kind });
            return;
        }

        if self.newer_in_flight(&key, generation) {
            if self.held.get(&key).is_some_and(|h| h.generation > generation) {
                log::debug!(target: "store", "request {} {} superseded, dropping result", id, kind);
                events.push(StoreEvent::Stale { id, kind });
                return;
            }
            log::debug!(target: "store", "request {} {} held until newer request settles", id, kind);
            if let Some(older) = self.held.insert(key, result) {
                events.push(StoreEvent::Stale { id: older.id, kind: older.kind });
            }
            events.push(StoreEvent::Held { id, kind });
            return;
        }

        self.generation.mark_applied(&key, generation);
        events.push(self.merge_result(id, kind, result.outcome));
        // Anything still held is older than what was just merged
        if let Some(older) = self.held.remove(&key) {
            log::debug!(target: "store", "request {} {} superseded, dropping result", older.id, older.kind);
            events.push(StoreEvent::Stale { id: older.id, kind: older.kind });
        }
    }

    /// After a failed page request, merge the held result if nothing newer
    /// is still in flight for that list.
    fn release_held(&mut self, key: &GenerationKey, events: &mut Vec<StoreEvent>) {
        let Some(generation) = self.held.get(key).map(|h| h.generation) else {
            return;
        };
        if self.newer_in_flight(key, generation) {
            return;
        }
        if let Some(held) = self.held.remove(key) {
            log::debug!(target: "store", "request {} {} released after newer request failed", held.id, held.kind);
            self.generation.mark_applied(key, held.generation);
            events.push(self.merge_result(held.id, held.kind, held.outcome));
        }
    }

    fn newer_in_flight(&self, key: &GenerationKey, generation: u64) -> bool {
        self.pending.values().any(|p| {
            p.generation
                .as_ref()
                .is_some_and(|(k, gen)| k == key && *gen > generation)
        })
    }

    fn merge_result(&mut self, id: RequestId, kind: ActionKind, outcome: Option<Outcome>) -> StoreEvent {
        match outcome {
            Some(outcome) => {
                self.merge_outcome(id, &outcome);
                StoreEvent::Applied { id, kind }
            }
            None => StoreEvent::Unchanged { id, kind },
        }
    }

    fn merge_outcome(&mut self, id: RequestId, outcome: &Outcome) {
        log::debug!(target: "store", "request {} applying {}", id, outcome.kind());
        reduce::reduce_outcome(outcome, &mut self.state);
        if let Some(log) = self.outcome_log.as_mut() {
            log.record(id, outcome);
        }
    }

    fn resolve_defaults(&self, action: DeferredAction) -> DeferredAction {
        match action {
            DeferredAction::LoadMoreReplies { comment_id, limit: None } => {
                DeferredAction::LoadMoreReplies { comment_id, limit: Some(self.replies_limit) }
            }
            other => other,
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }
}

impl Dispatcher for Store {
    fn dispatch(&mut self, action: Action) -> Dispatched {
        match action {
            Action::Immediate(a) => Dispatched::Applied(self.apply_immediate(&a)),
            Action::Deferred(a) => Dispatched::Pending(self.spawn_deferred(a)),
        }
    }
}

/// Pagination requests are superseded by newer requests for the same list.
fn generation_key(action: &DeferredAction) -> Option<GenerationKey> {
    match action {
        DeferredAction::LoadMoreComments => Some(GenerationKey::CommentsPage),
        DeferredAction::LoadMoreReplies { comment_id, .. } => {
            Some(GenerationKey::Replies(comment_id.clone()))
        }
        _ => None,
    }
}

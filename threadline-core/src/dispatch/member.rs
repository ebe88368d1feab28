use threadline_types::{CommentsState, MemberUpdate, Outcome};

use crate::client::{Api, ClientError};

/// The only handler that recovers locally: a rejected or empty update becomes
/// a `MemberUpdateFailed` outcome instead of an error.
///
/// Returns None when nothing would change; no request is sent then.
pub(super) fn update_member(update: &MemberUpdate, state: &CommentsState, api: &Api) -> Option<Outcome> {
    let patch = update.diff(state.member.as_ref());
    if patch.is_empty() {
        return None;
    }

    let outcome = match api.member.update(&patch) {
        Ok(Some(member)) => Outcome::MemberUpdated(member),
        Ok(None) => {
            log::warn!(target: "dispatch", "member update returned nothing");
            Outcome::MemberUpdateFailed(ClientError::MemberUpdateFailed.to_string())
        }
        Err(e) => {
            log::warn!(target: "dispatch", "member update failed: {}", e);
            Outcome::MemberUpdateFailed(e.to_string())
        }
    };
    Some(outcome)
}

use crate::{CommentsState, Outcome};

pub(super) fn reduce(outcome: &Outcome, state: &mut CommentsState) {
    match outcome {
        Outcome::MemberUpdated(member) => {
            state.member = Some(member.clone());
            state.success = Some(true);
        }
        Outcome::MemberUpdateFailed(error) => {
            state.success = Some(false);
            state.error = Some(error.clone());
        }
        _ => {}
    }
}

use crate::{CommentsState, ImmediateAction};

pub(super) fn reduce(action: &ImmediateAction, state: &mut CommentsState) {
    match action {
        ImmediateAction::OpenPopup(popup) => {
            state.popup = Some(popup.clone());
        }
        ImmediateAction::ClosePopup => {
            state.popup = None;
        }
        ImmediateAction::IncreaseSecundaryFormCount => {
            state.secundary_form_count += 1;
        }
        ImmediateAction::DecreaseSecundaryFormCount => {
            state.secundary_form_count = (state.secundary_form_count - 1).max(0);
        }
    }
}

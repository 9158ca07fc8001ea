//! Root reducer - delegates to the slice and owns the alert

use slice_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;
use crate::user_location;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::UserLocation(action) => {
            user_location::reducer(&mut state.user_location, action)
                .map_effects(Effect::UserLocation)
        }

        Action::AlertShow(message) => {
            state.alert = Some(message);
            DispatchResult::changed()
        }

        Action::AlertDismiss => {
            if state.alert.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the main loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::user_location::{UserLocationAction, UserLocationEffect};

    #[test]
    fn test_slice_effects_are_lifted() {
        let mut state = AppState::default();
        let result = reducer(&mut state, UserLocationAction::FetchRequest.into());

        assert!(result.changed);
        assert_eq!(
            result.effects,
            vec![Effect::UserLocation(UserLocationEffect::Fetch)]
        );
        assert!(state.user_location.loading);
    }

    #[test]
    fn test_alert_actions_leave_slice_alone() {
        let mut state = AppState::default();
        state.user_location.loading = true;
        let slice_before = state.user_location.clone();

        assert!(reducer(&mut state, Action::AlertShow("boom".into())).changed);
        assert_eq!(state.alert.as_deref(), Some("boom"));
        assert!(reducer(&mut state, Action::AlertDismiss).changed);
        assert_eq!(state.alert, None);
        assert!(!reducer(&mut state, Action::AlertDismiss).changed);

        assert_eq!(state.user_location, slice_before);
    }

    #[test]
    fn test_fetch_failure_asks_for_alert() {
        let mut state = AppState::default();
        let result = reducer(
            &mut state,
            UserLocationAction::FetchFailure(ApiError::Rejected("offline".into())).into(),
        );
        assert_eq!(
            result.effects,
            vec![Effect::UserLocation(UserLocationEffect::Alert(
                "offline".into()
            ))]
        );
        // Shown only once the effect handler turns it into AlertShow
        assert_eq!(state.alert, None);
    }
}

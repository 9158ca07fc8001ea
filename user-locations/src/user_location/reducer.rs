//! Reducer - pure state transitions of the slice

use slice_dispatch::DispatchResult;

use super::action::UserLocationAction;
use super::effect::UserLocationEffect;
use super::state::{RegistrationDialog, UserLocationState};
use crate::model::UserLocationId;

pub fn reducer(
    state: &mut UserLocationState,
    action: UserLocationAction,
) -> DispatchResult<UserLocationEffect> {
    match action {
        UserLocationAction::ToggleSelection(id) => {
            let ids = &mut state.active_user_location_ids;
            match ids.iter().position(|active| *active == id) {
                Some(index) => {
                    ids.remove(index);
                }
                None => ids.push(id),
            }
            DispatchResult::changed()
        }

        UserLocationAction::OpenRegistrationDialog => {
            state.registration_dialog = Some(RegistrationDialog::default());
            DispatchResult::changed()
        }

        UserLocationAction::CloseRegistrationDialog => {
            if state.registration_dialog.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        UserLocationAction::FetchRequest => {
            state.loading = true;
            DispatchResult::changed_with(UserLocationEffect::Fetch)
        }

        UserLocationAction::FetchSuccess(locations) => {
            let mut active: Vec<UserLocationId> = Vec::with_capacity(locations.len());
            for location in &locations {
                if !active.contains(&location.id) {
                    active.push(location.id.clone());
                }
            }
            state.user_locations = locations;
            state.active_user_location_ids = active;
            state.loading = false;
            DispatchResult::changed()
        }

        UserLocationAction::FetchFailure(error) => {
            tracing::warn!(error = %error, "Fetching user locations failed");
            state.loading = false;
            DispatchResult::changed_with(UserLocationEffect::Alert(error.to_string()))
        }

        UserLocationAction::CreateRequest(payload) => {
            DispatchResult::effect(UserLocationEffect::Create(payload))
        }

        UserLocationAction::CreateSuccess(location) => {
            state.user_locations.push(location);
            state.registration_dialog = None;
            DispatchResult::changed()
        }

        UserLocationAction::CreateFailure(error) => match state.registration_dialog.as_mut() {
            Some(dialog) => {
                dialog.error = Some(error.to_string());
                DispatchResult::changed()
            }
            None => {
                tracing::warn!(
                    error = %error,
                    "Dropping create failure, registration dialog already closed"
                );
                DispatchResult::unchanged()
            }
        },
    }
}

//! Read-only views of the slice, taken from the root state

use crate::model::{UserLocation, UserLocationId};
use crate::state::AppState;

pub fn is_active(state: &AppState, id: &UserLocationId) -> bool {
    state.user_location.is_active(id)
}

pub fn get_user_locations(state: &AppState) -> &[UserLocation] {
    &state.user_location.user_locations
}

pub fn is_loading(state: &AppState) -> bool {
    state.user_location.loading
}

pub fn is_registration_dialog_open(state: &AppState) -> bool {
    state.user_location.is_registration_dialog_open()
}

/// Error of the last failed create, if the dialog is open
pub fn registration_error(state: &AppState) -> Option<&str> {
    state.user_location.registration_error()
}

/// Number of selected locations
pub fn active_count(state: &AppState) -> usize {
    state.user_location.active_user_location_ids.len()
}

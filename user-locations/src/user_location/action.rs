//! Actions of the user location slice
//!
//! Async operations come in request / success / failure triples. Only the
//! request variants are meant to be dispatched by the UI; the epics emit the
//! other two.

use slice_dispatch::Action;

use crate::api::ApiError;
use crate::model::{CreateUserLocationPayload, UserLocation, UserLocationId};

/// Every action the slice reacts to, tagged `userLocation/...`
#[derive(Action, Clone, Debug, PartialEq)]
#[action(namespace = "userLocation")]
pub enum UserLocationAction {
    /// Flip membership of one location in the active set
    ToggleSelection(UserLocationId),

    OpenRegistrationDialog,
    CloseRegistrationDialog,

    FetchRequest,
    FetchSuccess(Vec<UserLocation>),
    FetchFailure(ApiError),

    CreateRequest(CreateUserLocationPayload),
    CreateSuccess(UserLocation),
    CreateFailure(ApiError),
}

pub fn toggle_user_location_selection(id: impl Into<UserLocationId>) -> UserLocationAction {
    UserLocationAction::ToggleSelection(id.into())
}

pub fn open_user_location_registration_dialog() -> UserLocationAction {
    UserLocationAction::OpenRegistrationDialog
}

pub fn close_user_location_registration_dialog() -> UserLocationAction {
    UserLocationAction::CloseRegistrationDialog
}

pub fn fetch_user_locations() -> UserLocationAction {
    UserLocationAction::FetchRequest
}

pub fn create_user_location(payload: CreateUserLocationPayload) -> UserLocationAction {
    UserLocationAction::CreateRequest(payload)
}

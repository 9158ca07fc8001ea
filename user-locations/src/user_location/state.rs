//! State owned by the user location slice

use crate::model::{UserLocation, UserLocationId};

/// Open registration dialog
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationDialog {
    /// Message of the last failed create, while the dialog stays open
    pub error: Option<String>,
}

/// The slice state; `Default` is the initial state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserLocationState {
    /// Locations in server order
    pub user_locations: Vec<UserLocation>,
    /// Selection set, kept in insertion order, no duplicates
    pub active_user_location_ids: Vec<UserLocationId>,
    /// True while a fetch is in flight
    pub loading: bool,
    /// `None` while the dialog is closed
    pub registration_dialog: Option<RegistrationDialog>,
}

impl UserLocationState {
    pub fn is_active(&self, id: &UserLocationId) -> bool {
        self.active_user_location_ids.iter().any(|active| active == id)
    }

    pub fn is_registration_dialog_open(&self) -> bool {
        self.registration_dialog.is_some()
    }

    pub fn registration_error(&self) -> Option<&str> {
        self.registration_dialog
            .as_ref()
            .and_then(|dialog| dialog.error.as_deref())
    }
}

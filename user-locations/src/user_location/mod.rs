//! The `userLocation` slice: actions, reducer, epics and selectors

pub mod action;
pub mod effect;
pub mod epics;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use action::{
    close_user_location_registration_dialog, create_user_location, fetch_user_locations,
    open_user_location_registration_dialog, toggle_user_location_selection, UserLocationAction,
};
pub use effect::UserLocationEffect;
pub use epics::{UserLocationEpics, CREATE_TASK, FETCH_TASK};
pub use reducer::reducer;
pub use state::{RegistrationDialog, UserLocationState};

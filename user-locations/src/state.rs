//! Root application state

use crate::user_location::UserLocationState;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// The `userLocation` slice
    pub user_location: UserLocationState,
    /// Blocking notification shown on top of everything else
    pub alert: Option<String>,
}
